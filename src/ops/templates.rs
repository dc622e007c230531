use crate::model::slot::{CallCategory, CallMode, CallSlot};

/// The four steps of handling an objection on a live sales call
pub const OBJECTION_STEPS: [&str; 4] = [
    "Listen & Acknowledge",
    "Clarify & Question",
    "Address the Objection",
    "Confirm & Close",
];

/// A preset task, optionally declaring a nested sub-checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetTask {
    pub text: &'static str,
    pub sub_checklist: &'static [&'static str],
}

const fn simple(text: &'static str) -> PresetTask {
    PresetTask {
        text,
        sub_checklist: &[],
    }
}

const SALES_CALL: &[PresetTask] = &[
    simple("Introduce Yourself"),
    simple("Confirm Decision Maker"),
    simple("Build Rapport"),
    simple("Discover Needs"),
    simple("Present Solution"),
    PresetTask {
        text: "Objection",
        sub_checklist: &OBJECTION_STEPS,
    },
    simple("Close the Deal"),
    simple("Schedule Follow-up"),
];

const SALES_VOICEMAIL: &[PresetTask] = &[
    simple("State Name and Company"),
    simple("Mention Referral or Trigger"),
    simple("Give One-line Value"),
    simple("Leave Callback Number"),
    simple("Send Follow-up Email"),
];

const REENGAGEMENT_CALL: &[PresetTask] = &[
    simple("Reintroduce Yourself"),
    simple("Reference Last Conversation"),
    simple("Ask What Has Changed"),
    simple("Share What's New"),
    simple("Agree Next Step"),
];

const REENGAGEMENT_VOICEMAIL: &[PresetTask] = &[
    simple("Reintroduce Yourself"),
    simple("Mention What's New"),
    simple("Leave Callback Number"),
];

const FOLLOWUP_CALL: &[PresetTask] = &[
    simple("Recap Previous Call"),
    simple("Answer Open Questions"),
    simple("Confirm Timeline"),
    simple("Book Next Meeting"),
];

const FOLLOWUP_VOICEMAIL: &[PresetTask] = &[
    simple("Reference Previous Call"),
    simple("Leave Callback Number"),
    simple("Send Recap Email"),
];

const AT_RISK_CALL: &[PresetTask] = &[
    simple("Acknowledge the Issue"),
    simple("Listen Without Interrupting"),
    simple("Confirm Impact"),
    simple("Offer Remedy"),
    simple("Agree Check-in Date"),
];

const AT_RISK_VOICEMAIL: &[PresetTask] = &[
    simple("Acknowledge the Issue"),
    simple("Promise Callback Time"),
    simple("Leave Direct Number"),
];

const SUPPORT_CALL: &[PresetTask] = &[
    simple("Verify Identity"),
    simple("Log the Issue"),
    simple("Troubleshoot"),
    simple("Confirm Resolution"),
    simple("Offer Further Help"),
];

const INTRODUCTION_CALL: &[PresetTask] = &[
    simple("Introduce Yourself"),
    simple("Explain Reason for Call"),
    simple("Ask Discovery Question"),
    simple("Offer Next Step"),
];

/// Read-only lookup of preset tasks per call slot
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskTemplateCatalog;

impl TaskTemplateCatalog {
    pub fn builtin() -> Self {
        TaskTemplateCatalog
    }

    /// Preset tasks for a slot, in order. Empty when none are defined.
    pub fn presets(&self, slot: CallSlot) -> &'static [PresetTask] {
        use CallCategory::*;
        use CallMode::*;
        match (slot.category, slot.mode) {
            (Sales, StartCall) => SALES_CALL,
            (Sales, Voicemail) => SALES_VOICEMAIL,
            (Reengagement, StartCall) => REENGAGEMENT_CALL,
            (Reengagement, Voicemail) => REENGAGEMENT_VOICEMAIL,
            (Followup, StartCall) => FOLLOWUP_CALL,
            (Followup, Voicemail) => FOLLOWUP_VOICEMAIL,
            (AtRisk, StartCall) => AT_RISK_CALL,
            (AtRisk, Voicemail) => AT_RISK_VOICEMAIL,
            (Support, StartCall) => SUPPORT_CALL,
            (Introduction, StartCall) => INTRODUCTION_CALL,
            (Support, Voicemail) | (Introduction, Voicemail) => &[],
        }
    }

    /// Preset task texts for a slot
    pub fn preset_texts(&self, slot: CallSlot) -> impl Iterator<Item = &'static str> {
        self.presets(slot).iter().map(|p| p.text)
    }

    /// Sub-checklist items declared for the task with exactly this text
    pub fn sub_checklist_for(&self, slot: CallSlot, text: &str) -> Option<&'static [&'static str]> {
        self.presets(slot)
            .iter()
            .find(|p| p.text == text && !p.sub_checklist.is_empty())
            .map(|p| p.sub_checklist)
    }
}
