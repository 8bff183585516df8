//! Note list controller and its collaborators.
//!
//! # Responsibility
//! - Drive the list view from storage loads and edit-screen results.
//! - Keep the in-memory list the single source for what is rendered.
//!
//! # Invariants
//! - At most one load per controller is in flight (`&mut self`).
//! - Edit-screen results patch the list in memory; they never re-query.

pub mod list_controller;
pub mod screen_result;
pub mod view;
