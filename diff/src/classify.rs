//! Path segment classification for schema diffs.
//!
//! Decides how an op's final path segment is rendered and whether the op is
//! reported at all. Both rules are fixed functions of the final segment.

use crate::tree::PathSegment;

/// Keys injected by the schema generator that carry no shape information.
const NOISE_KEYS: [&str; 2] = ["$comment", "__computed"];

/// Returns `true` when the segment addresses an array element.
///
/// Index ops use the "Array item at" message template instead of naming the
/// synthetic index.
pub fn is_array_index(segment: &PathSegment) -> bool {
    matches!(segment, PathSegment::Index(_))
}

/// Returns `true` when an op ending in this segment is dropped before
/// grouping.
///
/// `$comment` and `__computed` are introspection artifacts of the schema
/// generator, not real shape changes; an empty key means the path carries no
/// addressable leaf.
pub fn is_noise(segment: &PathSegment) -> bool {
    match segment {
        PathSegment::Key(key) => key.is_empty() || NOISE_KEYS.contains(&key.as_str()),
        PathSegment::Index(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_segments_classify_as_array_index() {
        assert!(is_array_index(&PathSegment::Index(3)));
        assert!(is_array_index(&PathSegment::Index(0)));
        assert!(!is_array_index(&PathSegment::Key("items".to_string())));
    }

    #[test]
    fn test_noise_keys_are_denylisted() {
        assert!(is_noise(&PathSegment::Key("$comment".to_string())));
        assert!(is_noise(&PathSegment::Key("__computed".to_string())));
        assert!(is_noise(&PathSegment::Key(String::new())));
        assert!(!is_noise(&PathSegment::Key("properties".to_string())));
    }

    #[test]
    fn test_index_zero_is_not_noise() {
        assert!(!is_noise(&PathSegment::Index(0)));
    }
}
