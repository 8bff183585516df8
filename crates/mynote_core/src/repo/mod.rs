//! Repository layer over the `note` table.
//!
//! # Invariants
//! - Read paths go through `mapping::map_rows`.
//! - Writes against unknown ids return `RepoError::NotFound`.

pub mod note_repo;
