//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod applications;
pub mod events;
pub mod health;
pub mod memberships;
pub mod profiles;
pub mod questions;
pub mod terms;
