//! Dynamic SQL built from filter, patch and ordering inputs
//!
//! Every value goes through `push_bind`; only column names known at compile
//! time are pushed as text.

mod builder;
mod filters;
mod order;
mod patches;

pub use builder::{escape_like, push_order, push_page, Assignments, Conditions, OrderColumn};
pub use filters::SqlFilter;
pub use patches::SqlPatch;
