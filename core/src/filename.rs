//! Filesystem-safe names for command and hook ids.
//!
//! Command ids are colon-delimited and some segments contain hyphens, so the
//! two characters would collide under a naive substitution. Encoding first
//! escapes literal hyphens to `__`, then maps colons to hyphens; decoding
//! reverses the two steps in the opposite order, making the pair a true
//! inverse for every id built from colons, hyphens, and underscores.

/// Encodes a command or hook id into its schema file name.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::schema_file_name;
///
/// assert_eq!(schema_file_name("a:b:c"), "a-b-c.json");
/// assert_eq!(schema_file_name("a:b:c-d"), "a-b-c__d.json");
/// ```
pub fn schema_file_name(id: &str) -> String {
    let base = id.replace('-', "__").replace(':', "-");
    format!("{base}.json")
}

/// Decodes a schema file name back into the command or hook id.
///
/// # Examples
///
/// ```
/// use command_snapshot_core::id_from_file_name;
///
/// assert_eq!(id_from_file_name("a-b-c.json"), "a:b:c");
/// assert_eq!(id_from_file_name("a-b-c__d.json"), "a:b:c-d");
/// ```
pub fn id_from_file_name(file: &str) -> String {
    let base = file.strip_suffix(".json").unwrap_or(file);
    base.replace('-', ":").replace("__", "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_plain_segments() {
        assert_eq!(schema_file_name("a:b:c"), "a-b-c.json");
    }

    #[test]
    fn test_encode_escapes_hyphens() {
        assert_eq!(schema_file_name("a:b:c-d"), "a-b-c__d.json");
    }

    #[test]
    fn test_decode_plain_segments() {
        assert_eq!(id_from_file_name("a-b-c.json"), "a:b:c");
    }

    #[test]
    fn test_decode_unescapes_hyphens() {
        assert_eq!(id_from_file_name("a-b-c__d.json"), "a:b:c-d");
        assert_eq!(id_from_file_name("a__b-c__d.json"), "a-b:c-d");
    }

    #[test]
    fn test_round_trip() {
        for id in [
            "status",
            "a:b:c",
            "a:b:c-d",
            "a-b:c-d",
            "snake_case:id",
            "many-hyphens-in:one-segment",
        ] {
            let encoded = schema_file_name(id);
            assert_eq!(id_from_file_name(&encoded), id, "decode(encode({id}))");
            assert_eq!(
                schema_file_name(&id_from_file_name(&encoded)),
                encoded,
                "encode(decode({encoded}))"
            );
        }
    }
}
