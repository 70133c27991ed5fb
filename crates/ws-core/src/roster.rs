//! Membership document reader.
//!
//! The document has a top-level `Wearers` field holding either a mapping of
//! arbitrary keys to wearer objects or a plain list of wearer objects; each
//! object carries an `id` (string or number). Blank ids and duplicates are
//! dropped. The reader never fails: a missing, unreadable, or malformed
//! document degrades to the empty set, which the reconciler treats as
//! authoritative ("everyone left").

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use ws_common::WearerId;

#[derive(Debug, Deserialize)]
struct RosterDoc {
    #[serde(rename = "Wearers", default)]
    wearers: Option<WearerField>,
}

/// `Wearers` is either keyed or a list; only the values matter.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WearerField {
    Map(serde_json::Map<String, Value>),
    List(Vec<Value>),
}

/// Load the set of wearer ids, degrading to empty on any failure.
pub fn load_wearer_ids(path: &Path) -> BTreeSet<WearerId> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "membership document unreadable, treating as empty");
            return BTreeSet::new();
        }
    };
    let doc: RosterDoc = match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "membership document malformed, treating as empty");
            return BTreeSet::new();
        }
    };

    let mut ids = BTreeSet::new();
    match doc.wearers {
        Some(WearerField::Map(map)) => {
            for entry in map.values() {
                if let Some(id) = entry_id(entry) {
                    ids.insert(WearerId::new(id));
                }
            }
        }
        Some(WearerField::List(list)) => {
            for entry in &list {
                if let Some(id) = entry_id(entry) {
                    ids.insert(WearerId::new(id));
                }
            }
        }
        None => {}
    }
    ids
}

/// Extract a non-blank `id` from a wearer object, stringifying numbers.
fn entry_id(entry: &Value) -> Option<String> {
    let id = entry.get("id")?;
    let s = match id {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn roster_from(json: &str) -> BTreeSet<WearerId> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        load_wearer_ids(file.path())
    }

    #[test]
    fn reads_mapping_form() {
        let ids = roster_from(r#"{"Wearers": {"a": {"id": "42"}, "b": {"id": 7}}}"#);
        assert_eq!(ids, BTreeSet::from([WearerId::new("42"), WearerId::new("7")]));
    }

    #[test]
    fn reads_list_form() {
        let ids = roster_from(r#"{"Wearers": [{"id": "42"}, {"id": "sock-alpha"}]}"#);
        assert_eq!(
            ids,
            BTreeSet::from([WearerId::new("42"), WearerId::new("sock-alpha")])
        );
    }

    #[test]
    fn blank_ids_and_duplicates_collapse() {
        let ids = roster_from(
            r#"{"Wearers": [{"id": "42"}, {"id": "42"}, {"id": "  "}, {"id": null}, null, {}]}"#,
        );
        assert_eq!(ids, BTreeSet::from([WearerId::new("42")]));
    }

    #[test]
    fn missing_file_yields_empty_set() {
        assert!(load_wearer_ids(Path::new("/nonexistent/wearers.json")).is_empty());
    }

    #[test]
    fn malformed_document_yields_empty_set() {
        assert!(roster_from("{not json").is_empty());
        assert!(roster_from(r#"{"Wearers": 5}"#).is_empty());
        assert!(roster_from("{}").is_empty());
    }
}
