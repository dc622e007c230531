use std::fmt;
use std::hash::Hash;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use indexmap::{Equivalent, IndexMap};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::store_io::{self, ReadOutcome, StoreKey};
use crate::model::checklist::{Cadence, Checklist, Progress};
use crate::model::name::ChecklistName;
use crate::model::task::Task;
use crate::ops::refresh;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("checklist name must not be blank")]
    InvalidName,
    #[error("a checklist named '{0}' already exists")]
    DuplicateName(String),
    #[error("checklist not found: {0}")]
    NotFound(String),
    #[error("task text must not be blank")]
    EmptyText,
    #[error("index {index} out of range ({len} items)")]
    Index { index: usize, len: usize },
    #[error("task '{0}' has no sub-checklist")]
    NoSubchecklist(String),
    #[error("could not write {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
    #[error("could not serialize checklists: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// All checklists of one store file, held in memory.
///
/// Every mutation writes the whole file before it takes effect in memory, so
/// a failed write leaves the store exactly as it was.
#[derive(Debug)]
pub struct ChecklistStore<K: StoreKey> {
    path: PathBuf,
    lists: IndexMap<K, Checklist>,
    today: NaiveDate,
}

/// Trim task text, rejecting blank input
fn clean_text(text: &str) -> Result<String, StoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(StoreError::EmptyText)
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn checklist_mut<'a, K, Q>(
    lists: &'a mut IndexMap<K, Checklist>,
    key: &Q,
) -> Result<&'a mut Checklist, StoreError>
where
    K: StoreKey,
    Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
{
    lists
        .get_mut(key)
        .ok_or_else(|| StoreError::NotFound(key.to_string()))
}

pub(crate) fn task_mut(list: &mut Checklist, index: usize) -> Result<&mut Task, StoreError> {
    let len = list.tasks.len();
    list.tasks
        .get_mut(index)
        .ok_or(StoreError::Index { index, len })
}

impl<K: StoreKey> ChecklistStore<K> {
    /// Load the store at `path` as of the local calendar day.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_at(path, Local::now().date_naive())
    }

    /// Load the store at `path`, running the daily refresh sweep for `today`.
    ///
    /// Never fails: a missing file is an empty store, and a file that cannot
    /// be read or parsed is copied to the recovery log and treated as empty.
    /// If the sweep changed anything the store is written back immediately.
    pub fn open_at(path: impl Into<PathBuf>, today: NaiveDate) -> Self {
        let mut store = Self::read(path.into(), today);
        if store.sweep() > 0 {
            store.save_or_warn();
        }
        store
    }

    pub(crate) fn read(path: PathBuf, today: NaiveDate) -> Self {
        let lists = match store_io::read_store::<K>(&path) {
            ReadOutcome::Missing => {
                tracing::debug!(path = %path.display(), "no store file yet");
                IndexMap::new()
            }
            ReadOutcome::Parsed(lists) => {
                tracing::debug!(path = %path.display(), count = lists.len(), "loaded checklists");
                lists
            }
            ReadOutcome::Malformed { raw, error } => {
                tracing::warn!(path = %path.display(), %error, "malformed store file, starting empty");
                recovery::log_recovery_once(
                    recovery::store_dir(&path),
                    RecoveryEntry::new(RecoveryCategory::Load, "malformed store file")
                        .field("Source", path.display().to_string())
                        .field("Error", error)
                        .body(raw),
                );
                IndexMap::new()
            }
            ReadOutcome::Unreadable { path: bad, source } => {
                tracing::warn!(path = %bad.display(), error = %source, "unreadable store file, starting empty");
                recovery::log_recovery_once(
                    recovery::store_dir(&bad),
                    RecoveryEntry::new(RecoveryCategory::Load, "unreadable store file")
                        .field("Source", bad.display().to_string())
                        .field("Error", source.to_string()),
                );
                IndexMap::new()
            }
        };
        ChecklistStore { path, lists, today }
    }

    pub(crate) fn sweep(&mut self) -> usize {
        refresh::sweep(&mut self.lists, self.today)
    }

    /// Persist after load; a failure here only costs the write, not the data.
    pub(crate) fn save_or_warn(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "could not persist checklists after load");
        }
    }

    /// Write the whole store to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write(&self.lists)
    }

    fn write(&self, lists: &IndexMap<K, Checklist>) -> Result<(), StoreError> {
        let content = K::encode(lists)?;
        if let Err(e) = recovery::atomic_write(&self.path, content.as_bytes()) {
            recovery::log_recovery(
                recovery::store_dir(&self.path),
                RecoveryEntry::new(RecoveryCategory::Write, "store write failed")
                    .field("Target", self.path.display().to_string())
                    .field("Error", e.to_string())
                    .body(content),
            );
            return Err(StoreError::Persist {
                path: self.path.clone(),
                source: e,
            });
        }
        tracing::debug!(path = %self.path.display(), count = lists.len(), "saved checklists");
        Ok(())
    }

    /// Apply `change` to a copy of the checklists, persist the copy, then
    /// swap it in. Any error leaves both memory and disk untouched.
    pub(crate) fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut IndexMap<K, Checklist>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut next = self.lists.clone();
        let out = change(&mut next)?;
        self.write(&next)?;
        self.lists = next;
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The calendar day this store was loaded for
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Checklist>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.lists.get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.lists.contains_key(key)
    }

    /// Checklists in store order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Checklist)> {
        self.lists.iter()
    }

    pub fn progress<Q>(&self, key: &Q) -> Option<Progress>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.lists.get(key).map(Checklist::progress)
    }

    pub(crate) fn lists_mut(&mut self) -> &mut IndexMap<K, Checklist> {
        &mut self.lists
    }

    // -----------------------------------------------------------------------
    // Checklist mutations
    // -----------------------------------------------------------------------

    /// Remove a checklist. The removed checklist is also copied to the
    /// recovery log.
    pub fn delete_checklist<Q>(&mut self, key: &Q) -> Result<Checklist, StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        let removed = self.commit(|lists| {
            lists
                .shift_remove(key)
                .ok_or_else(|| StoreError::NotFound(key.to_string()))
        })?;
        if let Ok(body) = serde_json::to_string_pretty(&removed) {
            recovery::log_recovery(
                recovery::store_dir(&self.path),
                RecoveryEntry::new(RecoveryCategory::Delete, format!("checklist {} deleted", key))
                    .field("Checklist", key.to_string())
                    .body(body),
            );
        }
        tracing::info!(checklist = %key, "deleted checklist");
        Ok(removed)
    }

    pub fn set_daily_refresh<Q>(&mut self, key: &Q, enabled: bool) -> Result<(), StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            checklist_mut(lists, key)?.daily_refresh = enabled;
            Ok(())
        })
    }

    pub fn set_cadence<Q>(&mut self, key: &Q, cadence: Option<Cadence>) -> Result<(), StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            checklist_mut(lists, key)?.cadence = cadence;
            Ok(())
        })
    }

    /// Clear every task's completion and discard all sub-checklists.
    pub fn reset_checklist<Q>(&mut self, key: &Q) -> Result<(), StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            checklist_mut(lists, key)?.reset();
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Task mutations
    // -----------------------------------------------------------------------

    /// Append a task. Returns its index.
    pub fn add_task<Q>(&mut self, key: &Q, text: &str) -> Result<usize, StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            let list = checklist_mut(lists, key)?;
            let text = clean_text(text)?;
            list.tasks.push(Task::new(text));
            Ok(list.tasks.len() - 1)
        })
    }

    /// Flip a task's done flag. Returns the new value.
    pub fn toggle_task<Q>(&mut self, key: &Q, index: usize) -> Result<bool, StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            let task = task_mut(checklist_mut(lists, key)?, index)?;
            let done = !task.done;
            task.set_done(done, Utc::now());
            Ok(done)
        })
    }

    pub fn edit_task_text<Q>(&mut self, key: &Q, index: usize, text: &str) -> Result<(), StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            let list = checklist_mut(lists, key)?;
            let text = clean_text(text)?;
            task_mut(list, index)?.text = text;
            Ok(())
        })
    }

    /// Remove a task; later tasks shift down by one. Returns the removed task.
    pub fn delete_task<Q>(&mut self, key: &Q, index: usize) -> Result<Task, StoreError>
    where
        Q: ?Sized + Hash + Equivalent<K> + fmt::Display,
    {
        self.commit(|lists| {
            let list = checklist_mut(lists, key)?;
            let len = list.tasks.len();
            if index >= len {
                return Err(StoreError::Index { index, len });
            }
            Ok(list.tasks.remove(index))
        })
    }
}

impl ChecklistStore<ChecklistName> {
    /// Create an empty checklist refreshed as of today.
    pub fn create_checklist(
        &mut self,
        name: &str,
        daily_refresh: bool,
    ) -> Result<&Checklist, StoreError> {
        self.create_checklist_with(name, daily_refresh, None)
    }

    /// Create an empty checklist carrying a cadence tag, in a single write.
    pub fn create_checklist_with(
        &mut self,
        name: &str,
        daily_refresh: bool,
        cadence: Option<Cadence>,
    ) -> Result<&Checklist, StoreError> {
        let name = ChecklistName::parse(name).ok_or(StoreError::InvalidName)?;
        let today = self.today;
        let key = name.clone();
        self.commit(move |lists| {
            if lists.contains_key(&name) {
                return Err(StoreError::DuplicateName(name.to_string()));
            }
            let mut list = Checklist::new(daily_refresh, today);
            list.cadence = cadence;
            lists.insert(name, list);
            Ok(())
        })?;
        tracing::info!(checklist = %key, daily_refresh, "created checklist");
        self.lists.get(&key).ok_or(StoreError::NotFound(key.to_string()))
    }

    /// Re-key a checklist, keeping its tasks, refresh metadata and position.
    pub fn rename_checklist(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if !self.lists.contains_key(old) {
            return Err(StoreError::NotFound(old.to_string()));
        }
        let new = ChecklistName::parse(new).ok_or(StoreError::InvalidName)?;
        if new.as_str() == old {
            return Ok(());
        }
        if self.lists.contains_key(&new) {
            return Err(StoreError::DuplicateName(new.to_string()));
        }
        self.commit(|lists| {
            *lists = std::mem::take(lists)
                .into_iter()
                .map(|(k, v)| if k.as_str() == old { (new.clone(), v) } else { (k, v) })
                .collect();
            Ok(())
        })?;
        tracing::info!(from = old, to = %new, "renamed checklist");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup() -> (TempDir, ChecklistStore<ChecklistName>) {
        let tmp = TempDir::new().unwrap();
        let store = ChecklistStore::open_at(tmp.path().join("checklists.json"), day("2026-10-18"));
        (tmp, store)
    }

    fn reload(store: &ChecklistStore<ChecklistName>) -> ChecklistStore<ChecklistName> {
        ChecklistStore::open_at(store.path().to_path_buf(), store.today())
    }

    fn texts(store: &ChecklistStore<ChecklistName>, name: &str) -> Vec<String> {
        store.get(name).unwrap().tasks.iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn open_missing_file_is_empty_and_writes_nothing() {
        let (tmp, store) = setup();
        assert!(store.is_empty());
        assert!(!tmp.path().join("checklists.json").exists());
    }

    #[test]
    fn create_persists_empty_checklist() {
        let (_tmp, mut store) = setup();
        let list = store.create_checklist("  Groceries ", true).unwrap();
        assert!(list.tasks.is_empty());
        assert!(list.daily_refresh);
        assert_eq!(list.last_refresh, Some(day("2026-10-18")));

        let loaded = reload(&store);
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get("Groceries").unwrap().tasks.is_empty());
    }

    #[test]
    fn create_blank_name_fails() {
        let (_tmp, mut store) = setup();
        assert!(matches!(
            store.create_checklist("   ", false),
            Err(StoreError::InvalidName)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn create_duplicate_fails_and_leaves_store_unchanged() {
        let (_tmp, mut store) = setup();
        store.create_checklist("Work", false).unwrap();
        store.add_task("Work", "Email").unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = store.create_checklist("Work", true).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "Work"));
        assert_eq!(texts(&store, "Work"), vec!["Email"]);
        assert!(!store.get("Work").unwrap().daily_refresh);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn names_are_case_sensitive() {
        let (_tmp, mut store) = setup();
        store.create_checklist("work", false).unwrap();
        store.create_checklist("Work", false).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn rename_moves_entry_and_keeps_position() {
        let (_tmp, mut store) = setup();
        store.create_checklist("A", true).unwrap();
        store.create_checklist("B", false).unwrap();
        store.create_checklist("C", false).unwrap();
        store.add_task("B", "x").unwrap();
        store.toggle_task("B", 0).unwrap();

        store.rename_checklist("B", "Beta").unwrap();
        let names: Vec<String> = store.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(names, vec!["A", "Beta", "C"]);
        assert!(store.get("B").is_none());
        assert!(store.get("Beta").unwrap().tasks[0].done);

        let loaded = reload(&store);
        assert_eq!(texts(&loaded, "Beta"), vec!["x"]);
    }

    #[test]
    fn rename_to_existing_fails_and_original_unaffected() {
        let (_tmp, mut store) = setup();
        store.create_checklist("Home", true).unwrap();
        store.add_task("Home", "Dishes").unwrap();
        store.create_checklist("Work", false).unwrap();
        let before = store.get("Home").unwrap().clone();

        let err = store.rename_checklist("Home", "Work").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
        assert_eq!(store.get("Home").unwrap(), &before);
        assert_eq!(reload(&store).get("Home").unwrap(), &before);
    }

    #[test]
    fn rename_errors() {
        let (_tmp, mut store) = setup();
        store.create_checklist("Home", false).unwrap();
        assert!(matches!(
            store.rename_checklist("Nope", "X"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.rename_checklist("Home", "  "),
            Err(StoreError::InvalidName)
        ));
        store.rename_checklist("Home", "Home").unwrap();
        assert!(store.contains("Home"));
    }

    #[test]
    fn delete_checklist_removes_and_logs_recovery() {
        let (tmp, mut store) = setup();
        store.create_checklist("Trip", false).unwrap();
        store.add_task("Trip", "Passport").unwrap();
        let removed = store.delete_checklist("Trip").unwrap();
        assert_eq!(removed.tasks[0].text, "Passport");
        assert!(reload(&store).is_empty());

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries[0].category, RecoveryCategory::Delete);
        assert!(entries[0].body.contains("Passport"));

        assert!(matches!(
            store.delete_checklist("Trip"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn add_task_trims_and_returns_index() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        assert_eq!(store.add_task("G", " Milk ").unwrap(), 0);
        assert_eq!(store.add_task("G", "Eggs").unwrap(), 1);
        assert_eq!(texts(&store, "G"), vec!["Milk", "Eggs"]);
    }

    #[test]
    fn add_task_errors() {
        let (_tmp, mut store) = setup();
        assert!(matches!(
            store.add_task("Missing", "x"),
            Err(StoreError::NotFound(_))
        ));
        store.create_checklist("G", false).unwrap();
        assert!(matches!(store.add_task("G", " \n"), Err(StoreError::EmptyText)));
        assert!(store.get("G").unwrap().tasks.is_empty());
    }

    #[test]
    fn toggle_twice_restores_state() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        store.add_task("G", "Milk").unwrap();

        assert!(store.toggle_task("G", 0).unwrap());
        assert!(store.get("G").unwrap().tasks[0].completion_timestamp.is_some());
        assert!(!store.toggle_task("G", 0).unwrap());
        let task = &store.get("G").unwrap().tasks[0];
        assert!(!task.done);
        assert!(task.completion_timestamp.is_none());
    }

    #[test]
    fn toggle_out_of_range_fails() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        store.add_task("G", "Milk").unwrap();
        assert!(matches!(
            store.toggle_task("G", 1),
            Err(StoreError::Index { index: 1, len: 1 })
        ));
    }

    #[test]
    fn edit_task_text_validates() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        store.add_task("G", "Milk").unwrap();
        assert!(matches!(
            store.edit_task_text("G", 0, ""),
            Err(StoreError::EmptyText)
        ));
        assert!(matches!(
            store.edit_task_text("G", 3, "Oat milk"),
            Err(StoreError::Index { .. })
        ));
        store.edit_task_text("G", 0, "Oat milk").unwrap();
        assert_eq!(texts(&reload(&store), "G"), vec!["Oat milk"]);
    }

    #[test]
    fn delete_task_shifts_later_indices() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        for t in ["a", "b", "c", "d"] {
            store.add_task("G", t).unwrap();
        }
        store.toggle_task("G", 0).unwrap();
        let removed = store.delete_task("G", 1).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(texts(&store, "G"), vec!["a", "c", "d"]);
        assert!(store.get("G").unwrap().tasks[0].done);
        assert!(matches!(
            store.delete_task("G", 3),
            Err(StoreError::Index { index: 3, len: 3 })
        ));
    }

    #[test]
    fn reset_clears_all_done() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        store.add_task("G", "a").unwrap();
        store.add_task("G", "b").unwrap();
        store.toggle_task("G", 0).unwrap();
        store.toggle_task("G", 1).unwrap();
        store.reset_checklist("G").unwrap();
        let loaded = reload(&store);
        assert!(loaded.get("G").unwrap().tasks.iter().all(|t| !t.done));
        assert_eq!(loaded.progress("G"), Some(Progress { done: 0, total: 2 }));
    }

    #[test]
    fn set_refresh_and_cadence_persist() {
        let (_tmp, mut store) = setup();
        store.create_checklist("G", false).unwrap();
        store.set_daily_refresh("G", true).unwrap();
        store.set_cadence("G", Some(Cadence::Weekly)).unwrap();
        let loaded = reload(&store);
        let g = loaded.get("G").unwrap();
        assert!(g.daily_refresh);
        assert_eq!(g.cadence, Some(Cadence::Weekly));
    }

    #[test]
    fn malformed_file_loads_empty_and_is_preserved() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checklists.json");
        fs::write(&path, "{ \"broken\": ").unwrap();

        let store = ChecklistStore::<ChecklistName>::open_at(path.clone(), day("2026-10-18"));
        assert!(store.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ \"broken\": ");

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Load);
        assert_eq!(entries[0].body, "{ \"broken\": ");
    }

    #[test]
    fn open_persists_refresh_sweep_immediately() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checklists.json");
        fs::write(
            &path,
            r#"{"Morning": {"daily_refresh": true, "tasks": [{"text": "Run", "done": true}], "last_refresh": "2026-10-17"}}"#,
        )
        .unwrap();

        let store = ChecklistStore::<ChecklistName>::open_at(path.clone(), day("2026-10-18"));
        assert!(!store.get("Morning").unwrap().tasks[0].done);

        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["Morning"]["tasks"][0]["done"], false);
        assert_eq!(on_disk["Morning"]["last_refresh"], "2026-10-18");
    }

    /// Store whose file path has been replaced by a directory, so every
    /// write fails regardless of the user's privileges.
    fn blocked_store(tmp: &TempDir) -> ChecklistStore<ChecklistName> {
        let path = tmp.path().join("checklists.json");
        let mut store = ChecklistStore::<ChecklistName>::open_at(path.clone(), day("2026-10-18"));
        store.create_checklist("G", false).unwrap();
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        store
    }

    #[test]
    fn failed_write_leaves_memory_untouched() {
        let tmp = TempDir::new().unwrap();
        let mut store = blocked_store(&tmp);

        let err = store.add_task("G", "Eggs").unwrap_err();
        assert!(matches!(err, StoreError::Persist { .. }));
        assert!(store.get("G").unwrap().tasks.is_empty());

        let entries = recovery::read_recovery_entries(tmp.path(), None);
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert!(entries[0].body.contains("Eggs"));
    }

    #[test]
    fn failed_create_with_cadence_adds_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut store = blocked_store(&tmp);
        assert!(matches!(
            store.create_checklist_with("H", false, Some(Cadence::Weekly)),
            Err(StoreError::Persist { .. })
        ));
        assert!(!store.contains("H"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_with_cadence_is_one_write() {
        let (_tmp, mut store) = setup();
        let list = store
            .create_checklist_with("Bills", false, Some(Cadence::Monthly))
            .unwrap();
        assert_eq!(list.cadence, Some(Cadence::Monthly));
        assert_eq!(
            reload(&store).get("Bills").unwrap().cadence,
            Some(Cadence::Monthly)
        );
    }

    #[test]
    fn malformed_file_is_logged_once_across_loads() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("checklists.json");
        fs::write(&path, "{ \"broken\": ").unwrap();
        for _ in 0..3 {
            let store = ChecklistStore::<ChecklistName>::open_at(path.clone(), day("2026-10-18"));
            assert!(store.is_empty());
        }
        assert_eq!(recovery::read_recovery_entries(tmp.path(), None).len(), 1);

        fs::write(&path, "{ \"broken\": [").unwrap();
        ChecklistStore::<ChecklistName>::open_at(path.clone(), day("2026-10-18"));
        assert_eq!(recovery::read_recovery_entries(tmp.path(), None).len(), 2);
    }
}
