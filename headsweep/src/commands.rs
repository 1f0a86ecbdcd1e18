use clap::arg;
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("headsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("headsweep")
        .about("Scan a list of hosts and group them by the security headers they are missing")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<HOSTS_FILE>)
                .help("Newline-delimited file of hosts or URLs to scan")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-m --"mode" <MODE>)
                .required(false)
                .help(
                    "headers: group by missing security headers; iis: fingerprint IIS default \
                pages",
                )
                .value_parser(["headers", "iis"])
                .default_value("headers"),
        )
        .arg(arg!(-q --"quiet" "Suppress status output on stderr").required(false))
        .arg(
            arg!(--"log-file" <PATH>)
                .required(false)
                .help("File that diagnostics are appended to")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("debug.log"),
        )
}
