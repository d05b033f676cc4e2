//! Tag resolution and truncation.
//!
//! A record's tag is either the one configured on the logger, or the simple
//! name of the type or module that logged it. Tags longer than
//! [`MAX_TAG_LENGTH`] characters are cut and end with an ellipsis:
//! ```
//! use alog::tag::truncate;
//!
//! assert_eq!(truncate("Checkout"), "Checkout");
//! assert_eq!(truncate("AVeryLongComponentNameIndeed"), "AVeryLongComponentName…");
//! ```
use std::borrow::Cow;

/// Tags longer than this many characters are truncated.
pub const MAX_TAG_LENGTH: usize = 23;

/// Used when no tag is configured and the call site is unknown.
pub const DEFAULT_TAG: &str = "alog";

pub fn truncate(tag: &str) -> Cow<'_, str> {
    match tag.char_indices().nth(MAX_TAG_LENGTH) {
        None => Cow::Borrowed(tag),
        Some(_) => {
            let mut cut: String = tag.chars().take(MAX_TAG_LENGTH - 1).collect();
            cut.push('…');
            Cow::Owned(cut)
        }
    }
}

/// The last `::` segment of a path, looking through the `<T as Trait>` form
/// of trait impls to `T`.
pub fn simple_name(path: &str) -> &str {
    let path = match path.strip_prefix('<') {
        Some(inner) => inner
            .split_once(" as ")
            .map_or(inner.trim_end_matches('>'), |(ty, _)| ty),
        None => path,
    };
    let path = path.split('<').next().unwrap_or(path);
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_names() {
        assert_eq!(simple_name("app::orders::Checkout"), "Checkout");
        assert_eq!(simple_name("<app::Store as app::Repo>"), "Store");
        assert_eq!(simple_name("main"), "main");
        assert_eq!(simple_name("app::Cache<K>"), "Cache");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        let tag = "é".repeat(30);
        let cut = truncate(&tag);
        assert_eq!(cut.chars().count(), MAX_TAG_LENGTH);
        assert!(cut.ends_with('…'));
        assert_eq!(truncate(&"x".repeat(23)), "x".repeat(23));
    }
}
