use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::model::checklist::Checklist;

/// Daily refresh sweep: clear completion on every daily-refresh checklist
/// whose last refresh is not `today`, and stamp it with `today`.
///
/// Returns the number of checklists refreshed.
pub fn sweep<K: fmt::Display>(lists: &mut IndexMap<K, Checklist>, today: NaiveDate) -> usize {
    let mut refreshed = 0;
    for (key, list) in lists.iter_mut() {
        if !list.needs_refresh(today) {
            continue;
        }
        let cleared = list.clear_completion();
        list.last_refresh = Some(today);
        tracing::info!(checklist = %key, %today, cleared, "daily refresh");
        refreshed += 1;
    }
    refreshed
}
