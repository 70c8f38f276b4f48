//! Key layout and value encoding for the catalog.
//!
//! Maps tags, media identifiers and record fields to store keys and values, and
//! back. Tag lists are stored in a single hash field: every tag is
//! percent-encoded on its own and the results are joined with `,`, so a tag may
//! itself contain a comma.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;
use thiserror::Error;

/// Set of every tag ever created
pub const TAGS_KEY: &str = "tags";
/// Prefix of the per-tag index sets
pub const TAG_INDEX_PREFIX: &str = "tags:";
/// Prefix of the per-media record hashes
pub const MEDIA_PREFIX: &str = "media:";
pub const NAME_FIELD: &str = "name";
pub const TAGS_FIELD: &str = "tags";

const TAG_SEPARATOR: char = ',';

/// Everything but unreserved characters is escaped, which covers `,`, `%`, `+`
/// and whitespace.
const TAG_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagDecodeError {
    #[error("decoding tag {index}: invalid escape sequence in {segment:?}")]
    InvalidEscape { index: usize, segment: String },

    #[error("decoding tag {index}: decoded bytes are not valid UTF-8")]
    InvalidUtf8 { index: usize },
}

/// Index set for `tag`. The tag is used verbatim.
pub fn tag_index_key(tag: &str) -> String {
    format!("{}{}", TAG_INDEX_PREFIX, tag)
}

/// Record hash for the media item `id`
pub fn media_key(id: &str) -> String {
    format!("{}{}", MEDIA_PREFIX, id)
}

pub fn encode_tag(tag: &str) -> String {
    utf8_percent_encode(tag, TAG_ENCODE_SET).to_string()
}

/// Encode a tag list into its single-field form.
pub fn encode_tags<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|tag| encode_tag(tag.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode one percent-encoded tag. `index` is only used for error reporting.
///
/// Unlike `percent_decode_str`, a `%` that is not followed by two hex digits is
/// an error. `+` decodes to a space.
pub fn decode_tag(index: usize, segment: &str) -> Result<String, TagDecodeError> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit);
            if !well_formed {
                return Err(TagDecodeError::InvalidEscape {
                    index,
                    segment: segment.to_string(),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = segment.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| TagDecodeError::InvalidUtf8 { index })
}

/// Decode the single-field form back into the tag list. The field is always
/// split, so an empty field is the list holding one empty tag.
pub fn decode_tags(encoded: &str) -> Result<Vec<String>, TagDecodeError> {
    encoded
        .split(TAG_SEPARATOR)
        .enumerate()
        .map(|(index, segment)| decode_tag(index, segment))
        .collect()
}

/// Field map written for a media record
pub fn media_fields<S: AsRef<str>>(name: &str, tags: &[S]) -> Vec<(String, String)> {
    vec![
        (NAME_FIELD.to_string(), name.to_string()),
        (TAGS_FIELD.to_string(), encode_tags(tags)),
    ]
}

/// Name and tags of a media record read back from its field map. Missing fields
/// read as empty.
pub fn decode_media_fields(
    fields: &HashMap<String, String>,
) -> Result<(String, Vec<String>), TagDecodeError> {
    let name = fields.get(NAME_FIELD).cloned().unwrap_or_default();
    let tags = decode_tags(fields.get(TAGS_FIELD).map(String::as_str).unwrap_or_default())?;
    Ok((name, tags))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(tag_index_key("goal"), "tags:goal");
        assert_eq!(tag_index_key("a:b"), "tags:a:b");
        assert_eq!(media_key("0190-abc"), "media:0190-abc");
    }

    #[test]
    fn test_encode_escapes_separator_and_percent() {
        assert_eq!(encode_tags(&["a,b", "c%d"]), "a%2Cb,c%25d");
        assert_eq!(encode_tags(&["two words", "x+y"]), "two%20words,x%2By");
        assert_eq!(encode_tags(&["plain-tag_1.0~"]), "plain-tag_1.0~");
    }

    #[test]
    fn test_tags_with_separators_survive_encoding() {
        let tags = vec![
            "a,b".to_string(),
            "c%d".to_string(),
            "".to_string(),
            "émoji 🎬".to_string(),
            "%2C".to_string(),
        ];
        assert_eq!(decode_tags(&encode_tags(&tags)).unwrap(), tags);
    }

    #[test]
    fn test_decode_plus_as_space() {
        assert_eq!(decode_tags("ta+g,x").unwrap(), vec!["ta g", "x"]);
    }

    #[test]
    fn test_single_empty_tag_survives_encoding() {
        let tags = vec![String::new()];
        assert_eq!(encode_tags(&tags), "");
        assert_eq!(decode_tags("").unwrap(), tags);
        assert_eq!(decode_tags(",").unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_decode_rejects_bad_escapes() {
        assert_eq!(
            decode_tags("tag1,%zz").unwrap_err(),
            TagDecodeError::InvalidEscape {
                index: 1,
                segment: "%zz".to_string()
            }
        );
        assert!(matches!(
            decode_tags("ok%2").unwrap_err(),
            TagDecodeError::InvalidEscape { index: 0, .. }
        ));
        assert!(matches!(
            decode_tags("a,b,%").unwrap_err(),
            TagDecodeError::InvalidEscape { index: 2, .. }
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert_eq!(
            decode_tags("%FF").unwrap_err(),
            TagDecodeError::InvalidUtf8 { index: 0 }
        );
    }

    #[test]
    fn test_media_fields_round_trip() {
        let fields: HashMap<String, String> =
            media_fields("clip", &["t2", "ta,g3"]).into_iter().collect();
        assert_eq!(fields.get(TAGS_FIELD).unwrap(), "t2,ta%2Cg3");

        let (name, tags) = decode_media_fields(&fields).unwrap();
        assert_eq!(name, "clip");
        assert_eq!(tags, vec!["t2", "ta,g3"]);
    }

    #[test]
    fn test_decode_media_fields_missing_fields() {
        let (name, tags) = decode_media_fields(&HashMap::new()).unwrap();
        assert_eq!(name, "");
        assert_eq!(tags, vec![""]);
    }
}
