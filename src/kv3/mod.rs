//! KV3 property-tree store.
//!
//! Physics definitions ship as KV3 text documents: a tree of objects,
//! arrays, scalars, and hex byte-array leaves. This module parses the
//! subset of the format those documents use and exposes the result as a
//! store queried by dotted/indexed key paths, e.g.
//! `m_parts[0].m_rnShape.m_hulls[3].m_Hull.m_Faces`.
//!
//! The store deliberately returns *raw token text*: quoted strings keep
//! their quotes (downstream label cleaning strips them) and byte-array
//! leaves return the hex text between `#[` and `]`, which feeds
//! [`decode_blob`](crate::blob::decode_blob). Absence of a path is
//! distinguished from a present-but-empty value.
//!
//! # Example
//!
//! ```
//! use vcollide::kv3::Document;
//!
//! let doc = Document::parse(r#"
//! {
//!     m_collisionAttributes =
//!     [
//!         { m_CollisionGroupString = "default" },
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(
//!     doc.get("m_collisionAttributes[0].m_CollisionGroupString"),
//!     Some("\"default\""),
//! );
//! assert_eq!(doc.get("m_collisionAttributes[1].m_CollisionGroupString"), None);
//! ```

mod parse;

use crate::error::Result;

/// A parsed KV3 value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `{ key = value ... }`, in document order.
    Object(Vec<(String, Value)>),
    /// `[ value, value, ... ]`.
    Array(Vec<Value>),
    /// `#[ 0A 1B ... ]` — the raw hex text between the brackets.
    ByteArray(String),
    /// Any other leaf, stored as its raw token text (strings keep their
    /// surrounding quotes).
    Scalar(String),
}

/// A parsed physics document, queryable by key path.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse a KV3 text document.
    ///
    /// A leading `<!-- ... -->` header line and `//` comments are skipped.
    /// Structural errors (unterminated containers, missing `=`) fail with a
    /// positioned [`MalformedDocument`](crate::ExtractError::MalformedDocument).
    pub fn parse(text: &str) -> Result<Document> {
        Ok(Document {
            root: parse::parse_document(text)?,
        })
    }

    /// Look up a leaf by dotted/indexed path.
    ///
    /// Returns `None` for a missing key, an index past the end of an array,
    /// traversal into a non-container, or a path that lands on a container
    /// rather than a leaf.
    pub fn get(&self, path: &str) -> Option<&str> {
        let mut current = &self.root;
        let mut rest = path;
        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix('.') {
                rest = tail;
                continue;
            }
            if let Some(tail) = rest.strip_prefix('[') {
                let close = tail.find(']')?;
                let index: usize = tail[..close].parse().ok()?;
                current = match current {
                    Value::Array(items) => items.get(index)?,
                    _ => return None,
                };
                rest = &tail[close + 1..];
                continue;
            }
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let (name, tail) = rest.split_at(end);
            current = match current {
                Value::Object(entries) => entries
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value)?,
                _ => return None,
            };
            rest = tail;
        }
        match current {
            Value::Scalar(text) | Value::ByteArray(text) => Some(text),
            _ => None,
        }
    }

    /// Lazily enumerate indexed paths, stopping at the first absent value.
    ///
    /// `path_for(i)` builds the path for slot `i`; the iterator yields the
    /// raw value at each present slot in increasing order. Present but
    /// empty/non-matching values do not terminate the scan — only absence
    /// does.
    pub fn scan<'a, F>(&'a self, mut path_for: F) -> impl Iterator<Item = &'a str> + 'a
    where
        F: FnMut(usize) -> String + 'a,
    {
        let mut index = 0;
        std::iter::from_fn(move || {
            let value = self.get(&path_for(index))?;
            index += 1;
            Some(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    fn parse(text: &str) -> Document {
        Document::parse(text).unwrap()
    }

    #[test]
    fn test_scalar_lookup() {
        let doc = parse("{ m_nCollisionAttributeIndex = 0 }");
        assert_eq!(doc.get("m_nCollisionAttributeIndex"), Some("0"));
        assert_eq!(doc.get("m_missing"), None);
    }

    #[test]
    fn test_string_keeps_quotes() {
        let doc = parse(r#"{ m_CollisionGroupString = "Default" }"#);
        assert_eq!(doc.get("m_CollisionGroupString"), Some("\"Default\""));
    }

    #[test]
    fn test_nested_path() {
        let doc = parse(
            r#"{
                m_parts =
                [
                    {
                        m_rnShape =
                        {
                            m_hulls = [ { m_nCollisionAttributeIndex = 2 } ]
                        }
                    },
                ]
            }"#,
        );
        assert_eq!(
            doc.get("m_parts[0].m_rnShape.m_hulls[0].m_nCollisionAttributeIndex"),
            Some("2"),
        );
        assert_eq!(
            doc.get("m_parts[0].m_rnShape.m_hulls[1].m_nCollisionAttributeIndex"),
            None,
        );
        assert_eq!(doc.get("m_parts[1].m_rnShape"), None);
    }

    #[test]
    fn test_byte_array_inner_text() {
        let doc = parse("{ m_Faces = #[ 00 01 ] }");
        assert_eq!(doc.get("m_Faces"), Some(" 00 01 "));
    }

    #[test]
    fn test_empty_byte_array_is_present() {
        let doc = parse("{ m_Faces = #[] }");
        // Present but empty: distinguished from absence.
        assert_eq!(doc.get("m_Faces"), Some(""));
        assert_eq!(doc.get("m_Edges"), None);
    }

    #[test]
    fn test_container_path_is_not_a_leaf() {
        let doc = parse("{ m_hulls = [ 1, 2 ] }");
        assert_eq!(doc.get("m_hulls"), None);
        assert_eq!(doc.get("m_hulls[1]"), Some("2"));
    }

    #[test]
    fn test_header_and_comments_skipped() {
        let doc = parse(
            "<!-- kv3 encoding:text:version{e21c7f3c-8a33-41c5-9977-a76d3a32aa0d} -->\n\
             {\n\
                 // collision setup\n\
                 m_name = \"world\"\n\
             }",
        );
        assert_eq!(doc.get("m_name"), Some("\"world\""));
    }

    #[test]
    fn test_multiline_string() {
        let doc = parse("{ m_notes = \"\"\"line one\nline two\"\"\" }");
        assert_eq!(doc.get("m_notes"), Some("\"\"\"line one\nline two\"\"\""));
    }

    #[test]
    fn test_malformed_document_is_positioned() {
        let err = Document::parse("{\n    m_name = \n}").unwrap_err();
        match err {
            ExtractError::MalformedDocument { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_object() {
        assert!(Document::parse("{ m_name = 1 ").is_err());
    }

    #[test]
    fn test_scan_stops_on_absence() {
        let doc = parse(
            r#"{
                m_collisionAttributes =
                [
                    { m_CollisionGroupString = "default" },
                    { m_CollisionGroupString = "" },
                    { m_CollisionGroupString = "player" },
                ]
            }"#,
        );
        let values: Vec<&str> = doc
            .scan(|i| format!("m_collisionAttributes[{i}].m_CollisionGroupString"))
            .collect();
        // The empty string is present, so the scan continues past it.
        assert_eq!(values, vec!["\"default\"", "\"\"", "\"player\""]);
    }
}
