use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::task::{Task, TaskKind};

/// Informational cadence tag. Only `daily_refresh` drives behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    OneOff,
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    pub fn as_str(self) -> &'static str {
        match self {
            Cadence::OneOff => "one-off",
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one-off" => Ok(Cadence::OneOff),
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            other => Err(format!(
                "unknown cadence '{}' (expected one-off, daily, weekly, monthly)",
                other
            )),
        }
    }
}

/// An ordered list of tasks plus its refresh metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub daily_refresh: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Last calendar day the refresh sweep touched this checklist
    #[serde(default)]
    pub last_refresh: Option<NaiveDate>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,
}

impl Checklist {
    pub fn new(daily_refresh: bool, today: NaiveDate) -> Self {
        Checklist {
            daily_refresh,
            tasks: Vec::new(),
            last_refresh: Some(today),
            cadence: None,
        }
    }

    /// Build a checklist pre-filled with the given task texts
    pub fn with_tasks<I, S>(texts: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Checklist {
            tasks: texts.into_iter().map(Task::new).collect(),
            ..Checklist::new(false, today)
        }
    }

    /// Whether the daily sweep should clear this checklist on `today`
    pub fn needs_refresh(&self, today: NaiveDate) -> bool {
        self.daily_refresh && self.last_refresh != Some(today)
    }

    /// Clear completion on every task. Returns true if any task changed.
    pub fn clear_completion(&mut self) -> bool {
        let mut changed = false;
        for task in &mut self.tasks {
            if task.done || task.completion_timestamp.is_some() {
                task.clear_done();
                changed = true;
            }
        }
        changed
    }

    /// Clear completion and drop every nested sub-checklist
    pub fn reset(&mut self) {
        self.clear_completion();
        for task in &mut self.tasks {
            task.kind = TaskKind::Simple;
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            done: self.tasks.iter().filter(|t| t.is_complete()).count(),
            total: self.tasks.len(),
        }
    }

    /// Most recent completion time across all tasks
    pub fn last_completed(&self) -> Option<DateTime<Utc>> {
        self.tasks.iter().filter_map(|t| t.completion_timestamp).max()
    }
}

/// Done/total counts for a checklist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.done, self.total)
    }
}
