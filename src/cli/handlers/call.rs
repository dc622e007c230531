use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::cli::commands::CallArgs;
use crate::cli::handlers::Context;
use crate::cli::output::format_checklist;
use crate::model::slot::CallSlot;
use crate::ops::store::{ChecklistStore, StoreError};
use crate::ops::templates::TaskTemplateCatalog;

const SESSION_HELP: &str = "\
commands:
  show              print the checklist
  toggle N          toggle task N
  open N            open task N's sub-checklist
  sub N M           toggle item M of task N's sub-checklist
  add TEXT          add a task
  edit N TEXT       change task N's text
  rm N              remove task N
  new               new call: clear every task and sub-checklist
  help              this text
  quit              leave the session";

/// `tl call <category> <mode>`: interactive session on stdin/stdout
pub fn cmd_call(ctx: &Context, args: CallArgs) -> Result<(), Box<dyn Error>> {
    let catalog = TaskTemplateCatalog::builtin();
    let mut store = ChecklistStore::<CallSlot>::open_calls(ctx.config.store.call_file.clone(), &catalog);
    let slot = CallSlot::new(args.category, args.mode);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(
        &mut store,
        slot,
        &catalog,
        stdin.lock(),
        stdout.lock(),
        ctx.config.ui.show_timestamps,
    )?;
    Ok(())
}

/// Parsed session command
enum Action<'a> {
    Show,
    Toggle(usize),
    Open(usize),
    Sub(usize, usize),
    Add(&'a str),
    Edit(usize, &'a str),
    Remove(usize),
    NewCall,
    Help,
    Quit,
}

fn parse_number(word: Option<&str>) -> Result<usize, String> {
    let word = word.ok_or("missing task number")?;
    let n: usize = word
        .parse()
        .map_err(|_| format!("not a number: {}", word))?;
    n.checked_sub(1).ok_or_else(|| "numbers start at 1".to_string())
}

fn parse_action(line: &str) -> Result<Action<'_>, String> {
    let line = line.trim();
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    match cmd {
        "" | "show" | "ls" => Ok(Action::Show),
        "toggle" | "t" => Ok(Action::Toggle(parse_number(Some(rest))?)),
        "open" | "o" => Ok(Action::Open(parse_number(Some(rest))?)),
        "sub" | "s" => {
            let mut words = rest.split_whitespace();
            let task = parse_number(words.next())?;
            let item = parse_number(words.next())?;
            Ok(Action::Sub(task, item))
        }
        "add" | "a" => Ok(Action::Add(rest)),
        "edit" | "e" => {
            let (n, text) = rest.split_once(' ').unwrap_or((rest, ""));
            Ok(Action::Edit(parse_number(Some(n))?, text))
        }
        "rm" => Ok(Action::Remove(parse_number(Some(rest))?)),
        "new" => Ok(Action::NewCall),
        "help" | "?" => Ok(Action::Help),
        "quit" | "exit" | "q" => Ok(Action::Quit),
        other => Err(format!("unknown command: {} (try `help`)", other)),
    }
}

fn apply(
    store: &mut ChecklistStore<CallSlot>,
    slot: CallSlot,
    catalog: &TaskTemplateCatalog,
    action: &Action<'_>,
) -> Result<(), StoreError> {
    match *action {
        Action::Toggle(i) => store.toggle_task(&slot, i).map(|_| ()),
        Action::Open(i) => store.activate_sub_checklist(slot, i, catalog).map(|_| ()),
        Action::Sub(i, j) => {
            store.activate_sub_checklist(slot, i, catalog)?;
            store.toggle_sub_task(slot, i, j).map(|_| ())
        }
        Action::Add(text) => store.add_task(&slot, text).map(|_| ()),
        Action::Edit(i, text) => store.edit_task_text(&slot, i, text),
        Action::Remove(i) => store.delete_task(&slot, i).map(|_| ()),
        Action::NewCall => store.reset_checklist(&slot),
        Action::Show | Action::Help | Action::Quit => Ok(()),
    }
}

fn print_checklist<W: Write>(
    out: &mut W,
    store: &ChecklistStore<CallSlot>,
    slot: CallSlot,
    show_timestamps: bool,
) -> io::Result<()> {
    if let Some(list) = store.get(&slot) {
        for line in format_checklist(&slot.to_string(), list, show_timestamps) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Read session commands from `input` until `quit` or end of input,
/// re-printing the checklist after every change. Errors are shown as
/// warnings and the session carries on.
pub fn run_session<R: BufRead, W: Write>(
    store: &mut ChecklistStore<CallSlot>,
    slot: CallSlot,
    catalog: &TaskTemplateCatalog,
    input: R,
    mut out: W,
    show_timestamps: bool,
) -> io::Result<()> {
    print_checklist(&mut out, store, slot, show_timestamps)?;
    for line in input.lines() {
        let line = line?;
        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(msg) => {
                writeln!(out, "warning: {}", msg)?;
                continue;
            }
        };
        match action {
            Action::Quit => break,
            Action::Help => {
                writeln!(out, "{}", SESSION_HELP)?;
                continue;
            }
            _ => {}
        }
        match apply(store, slot, catalog, &action) {
            Ok(()) => print_checklist(&mut out, store, slot, show_timestamps)?,
            Err(e) => writeln!(out, "warning: {}", e)?,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::slot::{CallCategory, CallMode};
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session(tmp: &TempDir, script: &str) -> (ChecklistStore<CallSlot>, String) {
        let catalog = TaskTemplateCatalog::builtin();
        let mut store = ChecklistStore::<CallSlot>::open_calls_at(
            tmp.path().join("calls.json"),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            &catalog,
        );
        let slot = CallSlot::new(CallCategory::Sales, CallMode::StartCall);
        let mut out = Vec::new();
        run_session(&mut store, slot, &catalog, Cursor::new(script), &mut out, false).unwrap();
        (store, String::from_utf8(out).unwrap())
    }

    fn sales_call() -> CallSlot {
        CallSlot::new(CallCategory::Sales, CallMode::StartCall)
    }

    #[test]
    fn objection_flow() {
        let tmp = TempDir::new().unwrap();
        let (store, out) = session(&tmp, "sub 6 1\nsub 6 2\nsub 6 3\nsub 6 4\nquit\n");
        assert!(out.contains("6. [+] Objection  4/4"));
        let task = &store.get(&sales_call()).unwrap().tasks[5];
        assert!(!task.done);
        assert!(task.is_complete());
    }

    #[test]
    fn new_call_clears_everything() {
        let tmp = TempDir::new().unwrap();
        let (store, out) = session(&tmp, "toggle 1\nopen 6\nsub 6 1\nnew\n");
        let list = store.get(&sales_call()).unwrap();
        assert!(list.tasks.iter().all(|t| !t.done));
        assert!(list.tasks[5].sub_checklist().is_none());
        assert!(out.trim_end().ends_with("8. [ ] Schedule Follow-up"));
    }

    #[test]
    fn errors_are_warnings() {
        let tmp = TempDir::new().unwrap();
        let (_, out) = session(&tmp, "toggle 42\nopen 1\nfrobnicate\nadd   \ntoggle 0\n");
        assert!(out.contains("warning: index 41 out of range (8 items)"));
        assert!(out.contains("warning: task 'Introduce Yourself' has no sub-checklist"));
        assert!(out.contains("warning: unknown command: frobnicate"));
        assert!(out.contains("warning: task text must not be blank"));
        assert!(out.contains("warning: numbers start at 1"));
    }

    #[test]
    fn edits_persist() {
        let tmp = TempDir::new().unwrap();
        session(&tmp, "add Send pricing sheet\nedit 1 Say hello\nrm 2\ntoggle 1\n");
        let (store, _) = session(&tmp, "quit\n");
        let tasks = &store.get(&sales_call()).unwrap().tasks;
        assert_eq!(tasks[0].text, "Say hello");
        assert!(tasks[0].done);
        assert_eq!(tasks[1].text, "Build Rapport");
        assert_eq!(tasks.last().unwrap().text, "Send pricing sheet");
    }
}
