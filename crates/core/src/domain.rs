use url::Url;

/// Extract the hostname from a submitted URL.
///
/// The hostname is the partition key for sessions. Falls back to stripping
/// the scheme and path by hand when the input is not an absolute URL, so a
/// bare "example.com/pricing" still maps to "example.com".
#[must_use]
pub fn domain_from_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => host.to_owned(),
            None => strip_scheme(raw),
        },
        Err(_) => strip_scheme(raw),
    }
}

fn strip_scheme(raw: &str) -> String {
    let without_scheme = raw.trim_start_matches("https://").trim_start_matches("http://");
    without_scheme.split('/').next().unwrap_or_default().to_owned()
}
