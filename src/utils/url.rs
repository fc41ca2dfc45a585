//! URL and resource-path helpers
//!
//! Writeup bodies live either behind an HTTP base URL or in a local content
//! directory. These helpers turn a catalog `filePath` into one or the other
//! without doubling or dropping slashes.

use std::path::PathBuf;

/// Where a writeup body should be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Remote(String),
    Local(PathBuf),
}

impl std::fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceLocation::Remote(url) => f.write_str(url),
            ResourceLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Normalize a base URL by removing trailing slashes
///
/// # Examples
///
/// ```
/// use termblog::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://blog.example.com/"), "https://blog.example.com");
/// assert_eq!(normalize_base_url("https://blog.example.com///"), "https://blog.example.com");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and a path with exactly one slash between them
///
/// # Examples
///
/// ```
/// use termblog::utils::url::join_url;
///
/// assert_eq!(
///     join_url("https://blog.example.com/content/", "/writeups/web/a.md"),
///     "https://blog.example.com/content/writeups/web/a.md"
/// );
/// ```
pub fn join_url(base_url: &str, path: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let path = path.trim_start_matches('/');
    format!("{}/{}", normalized_base, path)
}

pub fn is_http_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a catalog `filePath` against the configured content base.
pub fn resolve_resource(content_base: &str, file_path: &str) -> ResourceLocation {
    if is_http_url(content_base) {
        return ResourceLocation::Remote(join_url(content_base.trim(), file_path));
    }

    let mut path = PathBuf::from(content_base);
    for segment in file_path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        path.push(segment);
    }
    ResourceLocation::Local(path)
}

/// Fill `{city}` in a weather endpoint template. Without a placeholder the
/// city is appended as a path segment.
pub fn weather_url(template: &str, city: &str) -> String {
    if template.contains("{city}") {
        template.replace("{city}", city)
    } else {
        join_url(template, city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://blog.example.com/posts"),
            "https://blog.example.com/posts"
        );
        assert_eq!(
            normalize_base_url("https://blog.example.com/posts/"),
            "https://blog.example.com/posts"
        );
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://blog.example.com", "writeups/a.md"),
            "https://blog.example.com/writeups/a.md"
        );
        assert_eq!(
            join_url("https://blog.example.com///", "///writeups/a.md"),
            "https://blog.example.com/writeups/a.md"
        );
    }

    #[test]
    fn resolves_remote_and_local_bases() {
        assert_eq!(
            resolve_resource("https://blog.example.com/", "/writeups/web/a.md"),
            ResourceLocation::Remote("https://blog.example.com/writeups/web/a.md".to_string())
        );
        assert_eq!(
            resolve_resource("/srv/content", "/writeups/web/a.md"),
            ResourceLocation::Local(PathBuf::from("/srv/content/writeups/web/a.md"))
        );
    }

    #[test]
    fn local_resolution_ignores_empty_and_dot_segments() {
        assert_eq!(
            resolve_resource("content", "./writeups//web/a.md"),
            ResourceLocation::Local(PathBuf::from("content/writeups/web/a.md"))
        );
    }

    #[test]
    fn weather_template_substitution() {
        assert_eq!(
            weather_url("https://wttr.in/{city}?ATm", "New+York"),
            "https://wttr.in/New+York?ATm"
        );
        assert_eq!(
            weather_url("https://weather.example.com/", "Brussels"),
            "https://weather.example.com/Brussels"
        );
    }
}
