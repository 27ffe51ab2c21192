//! Pure domain logic for the SignQuest learning platform.
//!
//! This crate has zero internal dependencies and no database access: mission
//! descriptors and reward scaling, streak arithmetic, and quiz stage/level
//! gating are all evaluated against pre-loaded data passed in by the caller.
//! The `db` and `api` crates build on these rules.

pub mod error;
pub mod missions;
pub mod quiz;
pub mod streak;
pub mod types;
