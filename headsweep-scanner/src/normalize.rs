// Scheme handling for raw host lines

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Make sure a host line carries a scheme, defaulting to plain HTTP.
///
/// Lines that already start with `http://` or `https://` pass through untouched. Nothing
/// else is validated here; a malformed host fails later in the transport.
pub fn normalize_url(line: &str) -> String {
    if line.starts_with(HTTP_PREFIX) || line.starts_with(HTTPS_PREFIX) {
        line.to_string()
    } else {
        format!("{}{}", HTTP_PREFIX, line)
    }
}

/// Swap `http://` for `https://`, keeping the rest of the URL byte for byte.
///
/// Returns `None` when the URL is not plain HTTP, so there is nothing to upgrade.
pub fn upgrade_scheme(url: &str) -> Option<String> {
    url.strip_prefix("http")
        .filter(|rest| rest.starts_with("://"))
        .map(|rest| format!("https{}", rest))
}
