use colored::Colorize;
use headsweep::{ScanArgs, command_argument_builder, init_logging, run_scan};
use tracing::error;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    let args = match ScanArgs::from_matches(&matches) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    // Scan without a log file if it cannot be opened
    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("{} {:#}", "⚠".yellow().bold(), e);
    }

    match run_scan(args.mode, &args.hosts_file, args.quiet).await {
        Ok(report) => print!("{}", report),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}
