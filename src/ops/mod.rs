pub mod call;
pub mod refresh;
pub mod store;
pub mod templates;
