use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use indexmap::IndexMap;

use crate::model::checklist::Checklist;
use crate::model::slot::CallSlot;
use crate::model::task::{SubChecklist, TaskKind};
use crate::ops::store::{ChecklistStore, StoreError, checklist_mut, task_mut};
use crate::ops::templates::TaskTemplateCatalog;

/// Make sure every known slot exists, filling missing or empty slots with
/// their presets. Non-empty slots are never touched.
///
/// Returns the number of slots inserted or filled.
pub fn seed_slots(
    lists: &mut IndexMap<CallSlot, Checklist>,
    catalog: &TaskTemplateCatalog,
    today: NaiveDate,
) -> usize {
    let mut seeded = 0;
    for slot in CallSlot::all() {
        match lists.get_mut(&slot) {
            None => {
                lists.insert(slot, Checklist::with_tasks(catalog.preset_texts(slot), today));
                seeded += 1;
            }
            Some(list) if list.tasks.is_empty() && !catalog.presets(slot).is_empty() => {
                list.tasks = Checklist::with_tasks(catalog.preset_texts(slot), today).tasks;
                seeded += 1;
            }
            Some(_) => continue,
        }
        tracing::debug!(%slot, "seeded call checklist");
    }
    seeded
}

impl ChecklistStore<CallSlot> {
    /// Load the call-centre store for the local calendar day.
    pub fn open_calls(path: impl Into<PathBuf>, catalog: &TaskTemplateCatalog) -> Self {
        Self::open_calls_at(path, Local::now().date_naive(), catalog)
    }

    /// Load the call-centre store, run the refresh sweep, seed every known
    /// slot, and write back if either changed anything.
    pub fn open_calls_at(
        path: impl Into<PathBuf>,
        today: NaiveDate,
        catalog: &TaskTemplateCatalog,
    ) -> Self {
        let mut store = Self::read(path.into(), today);
        let refreshed = store.sweep();
        let seeded = seed_slots(store.lists_mut(), catalog, today);
        if seeded > 0 {
            tracing::info!(seeded, "seeded call checklists from presets");
        }
        if refreshed + seeded > 0 {
            store.save_or_warn();
        }
        store
    }

    /// Seed missing or empty slots and persist. Returns the number seeded.
    pub fn seed(&mut self, catalog: &TaskTemplateCatalog) -> Result<usize, StoreError> {
        let today = self.today();
        self.commit(|lists| Ok(seed_slots(lists, catalog, today)))
    }

    /// Attach the catalog-declared sub-checklist to a task, if it has none
    /// yet. Session-only: nothing is written to disk.
    pub fn activate_sub_checklist(
        &mut self,
        slot: CallSlot,
        index: usize,
        catalog: &TaskTemplateCatalog,
    ) -> Result<&SubChecklist, StoreError> {
        let task = task_mut(checklist_mut(self.lists_mut(), &slot)?, index)?;
        if matches!(task.kind, TaskKind::Simple) {
            let items = catalog
                .sub_checklist_for(slot, &task.text)
                .ok_or_else(|| StoreError::NoSubchecklist(task.text.clone()))?;
            task.kind = TaskKind::WithSubchecklist(SubChecklist::from_texts(items));
            tracing::debug!(%slot, index, "activated sub-checklist");
        }
        task.sub_checklist()
            .ok_or_else(|| StoreError::NoSubchecklist(task.text.clone()))
    }

    /// Flip one sub-item of an activated sub-checklist. Returns its new
    /// value. The parent task's own `done` flag is left alone.
    pub fn toggle_sub_task(
        &mut self,
        slot: CallSlot,
        index: usize,
        sub_index: usize,
    ) -> Result<bool, StoreError> {
        let task = task_mut(checklist_mut(self.lists_mut(), &slot)?, index)?;
        let text = task.text.clone();
        let sub = task
            .sub_checklist_mut()
            .ok_or(StoreError::NoSubchecklist(text))?;
        let len = sub.items.len();
        let item = sub.items.get_mut(sub_index).ok_or(StoreError::Index {
            index: sub_index,
            len,
        })?;
        item.done = !item.done;
        Ok(item.done)
    }
}
