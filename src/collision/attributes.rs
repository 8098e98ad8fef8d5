//! Collision attribute resolution.
//!
//! Shapes reference a slot in the document's collision-attribute list; the
//! extractor only keeps shapes whose slot is labeled with the default
//! collision group. Labels arrive as raw KV3 tokens, so they are cleaned
//! (quote-stripped, case-folded) before comparison.

use std::collections::HashSet;

use crate::kv3::Document;

/// The collision group whose shapes are extracted.
pub const DEFAULT_GROUP: &str = "default";

/// Normalize a raw collision-group token for comparison.
///
/// If the token starts with a double quote and contains a later one, only
/// the text between the first and *last* quote is kept — locating the last
/// quote tolerates trailing whitespace or newlines after the closing quote.
/// The result is ASCII-lowercased.
pub fn clean_label(raw: &str) -> String {
    let mut cleaned = raw;
    if cleaned.len() >= 2 && cleaned.starts_with('"') {
        if let Some(last) = cleaned.rfind('"') {
            if last > 0 {
                cleaned = &cleaned[1..last];
            }
        }
    }
    cleaned.to_ascii_lowercase()
}

/// Resolve the set of attribute-slot indices labeled [`DEFAULT_GROUP`].
///
/// Scans `m_collisionAttributes[i].m_CollisionGroupString` for increasing
/// `i`, stopping at the first absent slot. A present but empty or
/// non-matching label is rejected without terminating the scan. The set is
/// recomputed per document; callers only test membership.
pub fn resolve_default_indices(doc: &Document) -> HashSet<usize> {
    doc.scan(|i| format!("m_collisionAttributes[{i}].m_CollisionGroupString"))
        .enumerate()
        .filter(|(_, raw)| clean_label(raw) == DEFAULT_GROUP)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label_strips_quotes() {
        assert_eq!(clean_label("\"default\""), "default");
        assert_eq!(clean_label("\"Default\""), "default");
        assert_eq!(clean_label("\"DEFAULT\""), "default");
    }

    #[test]
    fn test_clean_label_trailing_newline() {
        // The closing quote is located from the end, so trailing garbage
        // after it is discarded rather than folded into the label.
        assert_eq!(clean_label("\"default\"\n"), "default");
        assert_eq!(clean_label("\"default\"  \n"), "default");
    }

    #[test]
    fn test_clean_label_unquoted() {
        assert_eq!(clean_label("Default"), "default");
        assert_eq!(clean_label(""), "");
        // A lone quote has no closing partner; nothing is stripped.
        assert_eq!(clean_label("\""), "\"");
    }

    #[test]
    fn test_resolver_accepts_only_default() {
        let doc = Document::parse(
            r#"{
                m_collisionAttributes =
                [
                    { m_CollisionGroupString = "Default" },
                    { m_CollisionGroupString = "player" },
                    { m_CollisionGroupString = "" },
                    { m_CollisionGroupString = "DEFAULT" },
                ]
            }"#,
        )
        .unwrap();

        let accepted = resolve_default_indices(&doc);
        assert_eq!(accepted.len(), 2);
        assert!(accepted.contains(&0));
        assert!(accepted.contains(&3));
        assert!(!accepted.contains(&1));
        assert!(!accepted.contains(&2));
    }

    #[test]
    fn test_resolver_empty_document() {
        let doc = Document::parse("{ }").unwrap();
        assert!(resolve_default_indices(&doc).is_empty());
    }
}
