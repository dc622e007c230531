pub mod cli;
pub mod io;
pub mod model;
pub mod ops;

pub use model::{Cadence, Checklist, ChecklistName, CallSlot, Task, TaskKind};
pub use ops::store::{ChecklistStore, StoreError};
pub use ops::templates::TaskTemplateCatalog;
