use std::fmt;
use std::fs;
use std::hash::Hash;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Serialize, de};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::model::checklist::Checklist;
use crate::model::name::ChecklistName;
use crate::model::slot::{CallCategory, CallMode, CallSlot};

/// How a family of checklist keys maps onto the store file.
///
/// Named checklists live in a flat `{ name: checklist }` object; call-centre
/// checklists nest by category then mode.
pub trait StoreKey: Clone + Eq + Hash + fmt::Display {
    fn decode(text: &str) -> serde_json::Result<IndexMap<Self, Checklist>>;
    fn encode(lists: &IndexMap<Self, Checklist>) -> serde_json::Result<String>;
}

fn invalid(msg: String) -> serde_json::Error {
    de::Error::custom(msg)
}

impl StoreKey for ChecklistName {
    /// Keys are trimmed on load; two keys that trim to the same name make
    /// the file malformed rather than silently dropping one of them.
    fn decode(text: &str) -> serde_json::Result<IndexMap<Self, Checklist>> {
        let raw: IndexMap<String, Checklist> = serde_json::from_str(text)?;
        let mut lists = IndexMap::with_capacity(raw.len());
        for (key, list) in raw {
            let name = ChecklistName::parse(&key)
                .ok_or_else(|| invalid("checklist name must not be blank".to_string()))?;
            if lists.contains_key(&name) {
                return Err(invalid(format!(
                    "checklist name '{}' appears more than once",
                    name
                )));
            }
            lists.insert(name, list);
        }
        Ok(lists)
    }

    fn encode(lists: &IndexMap<Self, Checklist>) -> serde_json::Result<String> {
        to_pretty_json(lists)
    }
}

impl StoreKey for CallSlot {
    fn decode(text: &str) -> serde_json::Result<IndexMap<Self, Checklist>> {
        let nested: IndexMap<CallCategory, IndexMap<CallMode, Checklist>> =
            serde_json::from_str(text)?;
        Ok(nested
            .into_iter()
            .flat_map(|(category, modes)| {
                modes
                    .into_iter()
                    .map(move |(mode, list)| (CallSlot::new(category, mode), list))
            })
            .collect())
    }

    fn encode(lists: &IndexMap<Self, Checklist>) -> serde_json::Result<String> {
        let mut nested: IndexMap<CallCategory, IndexMap<CallMode, &Checklist>> = IndexMap::new();
        for (slot, list) in lists {
            nested
                .entry(slot.category)
                .or_default()
                .insert(slot.mode, list);
        }
        to_pretty_json(&nested)
    }
}

/// Pretty JSON with four-space indentation and a trailing newline
fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Outcome of reading a store file
#[derive(Debug)]
pub enum ReadOutcome<K> {
    /// No file yet
    Missing,
    Parsed(IndexMap<K, Checklist>),
    /// The file exists but does not hold a valid store
    Malformed { raw: String, error: String },
    /// The file exists but could not be read
    Unreadable { path: PathBuf, source: io::Error },
}

/// Read and decode a store file without failing on bad content
pub fn read_store<K: StoreKey>(path: &Path) -> ReadOutcome<K> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return ReadOutcome::Missing,
        Err(e) => {
            return ReadOutcome::Unreadable {
                path: path.to_path_buf(),
                source: e,
            };
        }
    };
    match K::decode(&raw) {
        Ok(lists) => ReadOutcome::Parsed(lists),
        Err(e) => ReadOutcome::Malformed {
            raw,
            error: e.to_string(),
        },
    }
}
