use url::Url;

/// Parses `href` as an absolute URL.
///
/// Anything the URL parser rejects (relative paths, bare anchors, malformed
/// URIs) is reported as `None`, meaning "resolve against the containing
/// document".
pub fn convert_href_to_url(href: &str) -> Option<Url> {
    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(err) => {
            log::trace!("href {href:?} is not an absolute URL: {err}");
            None
        }
    }
}
