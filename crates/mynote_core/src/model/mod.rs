//! Domain model for the note list.
//!
//! # Invariants
//! - Note ids are assigned by storage, never by list code.
//! - List order is insertion order.

pub mod note;
pub mod note_list;
