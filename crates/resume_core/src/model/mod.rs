//! Résumé domain model.
//!
//! # Responsibility
//! - Define the typed document shape shared by persistence, editing and export.
//! - Own the embedded profile image payload format.
//!
//! # Invariants
//! - Every experience/project entry is identified by a stable `EntryId`.
//! - Profile images are stored inline, never as file paths.

pub mod document;
pub mod image;
