#[cfg(feature = "logging")]
use unicode_width::UnicodeWidthChar;

use url::Url;

/// Safely truncate a string, ensuring it is not truncated in the middle of multi-byte characters
///
/// The output's display width never exceeds `max_width`, ellipsis included.
#[cfg(feature = "logging")]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

/// `true` when `s` starts with an `http://` or `https://` scheme prefix.
pub fn has_http_scheme(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Host of `url` plus its explicit port, e.g. `example.com:8080`.
///
/// Returns an empty string when `url` cannot be parsed or has no host.
/// Default ports are normalized away (`https://a.com:443/` gives `a.com`)
/// and userinfo is dropped on purpose, so the value reads as a site name.
pub fn site_host(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };

    match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Resolve a possibly relative image reference against the page it was found on.
pub fn absolutize(reference: &str, page_url: &str) -> String {
    if has_http_scheme(reference) {
        return reference.to_string();
    }

    Url::parse(page_url)
        .and_then(|base| base.join(reference))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| reference.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "logging")]
    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Hello, world!", 10), "Hello, ...");
        assert_eq!(truncate_str("你好，世界！", 8), "你好...");
        assert_eq!(truncate_str("Hi!", 10), "Hi!");
    }

    #[test]
    fn test_site_host() {
        assert_eq!(site_host("https://site.com/post"), "site.com");
        assert_eq!(site_host("http://localhost:8080/a"), "localhost:8080");
        assert_eq!(site_host("https://site.com:443/"), "site.com");
        assert_eq!(site_host("not a url"), "");
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("/img/a.png", "https://site.com/post"),
            "https://site.com/img/a.png"
        );
        assert_eq!(
            absolutize("a.png", "https://site.com/blog/post"),
            "https://site.com/blog/a.png"
        );
        assert_eq!(
            absolutize("//cdn.site.com/a.png", "https://site.com/post"),
            "https://cdn.site.com/a.png"
        );
        assert_eq!(
            absolutize("https://other.com/a.png", "https://site.com/post"),
            "https://other.com/a.png"
        );
        assert_eq!(absolutize("/a.png", "garbage"), "/a.png");
    }
}
