use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item of a nested sub-checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTask {
    pub text: String,
    pub done: bool,
}

/// A small nested checklist owned by a single task. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubChecklist {
    pub items: Vec<SubTask>,
}

impl SubChecklist {
    /// Build a fresh sub-checklist with every item not done
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        SubChecklist {
            items: texts
                .iter()
                .map(|t| SubTask {
                    text: t.as_ref().to_string(),
                    done: false,
                })
                .collect(),
        }
    }

    /// True when there is at least one item and every item is done
    pub fn all_done(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.done)
    }

    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|i| i.done).count()
    }
}

/// Whether a task carries a nested checklist this session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskKind {
    #[default]
    Simple,
    WithSubchecklist(SubChecklist),
}

/// A single checklist entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// When the task was last marked done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_timestamp: Option<DateTime<Utc>>,

    // --- Session state ---
    #[serde(skip)]
    pub kind: TaskKind,
}

impl Task {
    /// Create a new, not-done task
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            done: false,
            completion_timestamp: None,
            kind: TaskKind::Simple,
        }
    }

    /// Mark done or not done, keeping the completion timestamp in step
    pub fn set_done(&mut self, done: bool, now: DateTime<Utc>) {
        self.done = done;
        self.completion_timestamp = if done { Some(now) } else { None };
    }

    /// Clear completion state. Sub-checklist state is left alone.
    pub fn clear_done(&mut self) {
        self.done = false;
        self.completion_timestamp = None;
    }

    pub fn sub_checklist(&self) -> Option<&SubChecklist> {
        match &self.kind {
            TaskKind::WithSubchecklist(sub) => Some(sub),
            TaskKind::Simple => None,
        }
    }

    pub fn sub_checklist_mut(&mut self) -> Option<&mut SubChecklist> {
        match &mut self.kind {
            TaskKind::WithSubchecklist(sub) => Some(sub),
            TaskKind::Simple => None,
        }
    }

    /// Derived completion: the task's own flag, or a fully ticked
    /// sub-checklist. Never written back to `done`.
    pub fn is_complete(&self) -> bool {
        self.done || self.sub_checklist().is_some_and(SubChecklist::all_done)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.done == other.done
            && self.completion_timestamp == other.completion_timestamp
    }
}

impl Eq for Task {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_done_tracks_timestamp() {
        let now = Utc::now();
        let mut task = Task::new("Milk");
        task.set_done(true, now);
        assert!(task.done);
        assert_eq!(task.completion_timestamp, Some(now));
        task.set_done(false, now);
        assert!(!task.done);
        assert!(task.completion_timestamp.is_none());
    }

    #[test]
    fn complete_via_sub_checklist_leaves_done_flag() {
        let mut task = Task::new("Objection");
        task.kind = TaskKind::WithSubchecklist(SubChecklist::from_texts(&["a", "b"]));
        assert!(!task.is_complete());
        for item in &mut task.sub_checklist_mut().unwrap().items {
            item.done = true;
        }
        assert!(task.is_complete());
        assert!(!task.done);
    }

    #[test]
    fn empty_sub_checklist_is_not_complete() {
        let sub = SubChecklist::from_texts::<&str>(&[]);
        assert!(!sub.all_done());
    }

    #[test]
    fn session_state_not_serialized() {
        let mut task = Task::new("Objection");
        task.kind = TaskKind::WithSubchecklist(SubChecklist::from_texts(&["a"]));
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"text":"Objection","done":false}"#);
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, TaskKind::Simple);
    }
}
