use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A checklist name: trimmed, non-empty, case-sensitive
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ChecklistName(String);

impl ChecklistName {
    /// Trim and validate a raw name. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ChecklistName(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChecklistName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ChecklistName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ChecklistName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ChecklistName::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom("checklist name must not be blank"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        assert_eq!(ChecklistName::parse("  Groceries ").unwrap().as_str(), "Groceries");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(ChecklistName::parse("").is_none());
        assert!(ChecklistName::parse("   \t").is_none());
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(ChecklistName::parse("Work"), ChecklistName::parse("work"));
    }

    #[test]
    fn blank_key_fails_to_deserialize() {
        assert!(serde_json::from_str::<ChecklistName>(r#"" ""#).is_err());
    }
}
