//! Case-insensitive text matching for search filtering.

/// Lower-case a raw search query the way the search box does.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase()
}

/// True when `needle` occurs in `haystack` ignoring case. Works on full
/// Unicode lowercasing since titles and tags may be Persian. An empty
/// needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        assert!(contains_ignore_case("Quantum Leap", "quantum"));
        assert!(contains_ignore_case("quantum leap", "LEAP"));
        assert!(!contains_ignore_case("quantum leap", "jump"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(contains_ignore_case("anything", ""));
        assert!(contains_ignore_case("", ""));
    }

    #[test]
    fn persian_text_matches() {
        assert!(contains_ignore_case("هویت بصری برند", "بصری"));
    }

    #[test]
    fn query_normalization_lowercases() {
        assert_eq!(normalize_query("DeSiGn"), "design");
    }
}
