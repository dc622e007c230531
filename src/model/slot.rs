use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of call a call-centre checklist is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CallCategory {
    #[serde(rename = "sales")]
    Sales,
    #[serde(rename = "reengagement")]
    Reengagement,
    #[serde(rename = "followup")]
    Followup,
    #[serde(rename = "at-risk")]
    AtRisk,
    #[serde(rename = "support")]
    Support,
    #[serde(rename = "introduction")]
    Introduction,
}

impl CallCategory {
    pub const ALL: [CallCategory; 6] = [
        CallCategory::Sales,
        CallCategory::Reengagement,
        CallCategory::Followup,
        CallCategory::AtRisk,
        CallCategory::Support,
        CallCategory::Introduction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CallCategory::Sales => "sales",
            CallCategory::Reengagement => "reengagement",
            CallCategory::Followup => "followup",
            CallCategory::AtRisk => "at-risk",
            CallCategory::Support => "support",
            CallCategory::Introduction => "introduction",
        }
    }
}

impl fmt::Display for CallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CallCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown call category '{}'", s))
    }
}

/// Whether the call reached a voicemail or a live conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CallMode {
    #[serde(rename = "voicemail")]
    Voicemail,
    #[serde(rename = "start call")]
    StartCall,
}

impl CallMode {
    pub const ALL: [CallMode; 2] = [CallMode::Voicemail, CallMode::StartCall];

    pub fn as_str(self) -> &'static str {
        match self {
            CallMode::Voicemail => "voicemail",
            CallMode::StartCall => "start call",
        }
    }
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallMode {
    type Err = String;

    /// Accepts `start call`, `start-call` and `start_call`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voicemail" => Ok(CallMode::Voicemail),
            "start call" | "start-call" | "start_call" => Ok(CallMode::StartCall),
            other => Err(format!("unknown call mode '{}'", other)),
        }
    }
}

/// Composite key of a call-centre checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallSlot {
    pub category: CallCategory,
    pub mode: CallMode,
}

impl CallSlot {
    pub fn new(category: CallCategory, mode: CallMode) -> Self {
        CallSlot { category, mode }
    }

    /// Every known (category, mode) pair, category-major
    pub fn all() -> impl Iterator<Item = CallSlot> {
        CallCategory::ALL
            .into_iter()
            .flat_map(|c| CallMode::ALL.into_iter().map(move |m| CallSlot::new(c, m)))
    }
}

impl fmt::Display for CallSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.category, self.mode)
    }
}
