pub mod task;
pub mod checklist;
pub mod name;
pub mod slot;
pub mod config;

pub use task::*;
pub use checklist::*;
pub use name::*;
pub use slot::*;
pub use config::*;
