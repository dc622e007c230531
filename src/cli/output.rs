use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::model::checklist::{Cadence, Checklist, Progress};
use crate::model::task::{SubChecklist, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ChecklistJson {
    pub name: String,
    pub daily_refresh: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<NaiveDate>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskJson>>,
}

#[derive(Serialize)]
pub struct TaskJson {
    /// 1-based number as accepted by the CLI
    pub number: usize,
    pub text: String,
    pub done: bool,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_checklist: Vec<SubTaskJson>,
}

#[derive(Serialize)]
pub struct SubTaskJson {
    pub text: String,
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(index: usize, task: &Task) -> TaskJson {
    TaskJson {
        number: index + 1,
        text: task.text.clone(),
        done: task.done,
        complete: task.is_complete(),
        completion_timestamp: task.completion_timestamp,
        sub_checklist: task
            .sub_checklist()
            .map(|sub| {
                sub.items
                    .iter()
                    .map(|i| SubTaskJson {
                        text: i.text.clone(),
                        done: i.done,
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Summary of a checklist; `with_tasks` includes the task list
pub fn checklist_to_json(name: &str, list: &Checklist, with_tasks: bool) -> ChecklistJson {
    ChecklistJson {
        name: name.to_string(),
        daily_refresh: list.daily_refresh,
        last_refresh: list.last_refresh,
        cadence: list.cadence,
        progress: list.progress(),
        tasks: with_tasks.then(|| {
            list.tasks
                .iter()
                .enumerate()
                .map(|(i, t)| task_to_json(i, t))
                .collect()
        }),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Checkbox character: `x` done, `+` complete through its sub-checklist
fn check_char(task: &Task) -> char {
    if task.done {
        'x'
    } else if task.is_complete() {
        '+'
    } else {
        ' '
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format a single task as a numbered line
pub fn format_task_line(index: usize, task: &Task, show_timestamps: bool) -> String {
    let mut line = format!("{:>3}. [{}] {}", index + 1, check_char(task), task.text);
    if show_timestamps && let Some(ts) = task.completion_timestamp {
        line.push_str(&format!("  (done {})", format_timestamp(ts)));
    }
    if let Some(sub) = task.sub_checklist() {
        line.push_str(&format!("  {}/{}", sub.done_count(), sub.items.len()));
    }
    line
}

/// Sub-checklist items, indented under their parent task
pub fn format_sub_checklist(sub: &SubChecklist) -> Vec<String> {
    sub.items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "       {}) [{}] {}",
                i + 1,
                if item.done { 'x' } else { ' ' },
                item.text
            )
        })
        .collect()
}

fn tags(list: &Checklist) -> String {
    let mut out = String::new();
    if list.daily_refresh {
        out.push_str(" [daily refresh]");
    }
    if let Some(cadence) = list.cadence {
        out.push_str(&format!(" [{}]", cadence));
    }
    out
}

/// Header line for a checklist view
pub fn format_checklist_header(name: &str, list: &Checklist) -> String {
    format!("== {} ({}) =={}", name, list.progress(), tags(list))
}

/// Full checklist view: header, tasks, and any open sub-checklists
pub fn format_checklist(name: &str, list: &Checklist, show_timestamps: bool) -> Vec<String> {
    let mut lines = vec![format_checklist_header(name, list)];
    if list.tasks.is_empty() {
        lines.push("  (no tasks)".to_string());
    }
    for (i, task) in list.tasks.iter().enumerate() {
        lines.push(format_task_line(i, task, show_timestamps));
        if let Some(sub) = task.sub_checklist() {
            lines.extend(format_sub_checklist(sub));
        }
    }
    lines
}

/// One line per checklist for `tl list`
pub fn format_checklist_summary(name: &str, list: &Checklist) -> String {
    format!("  {}  {}{}", name, list.progress(), tags(list))
}
