//! Core domain logic for the résumé builder.
//! This crate is the single source of truth for document invariants.

pub mod db;
pub mod engine;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use engine::{apply, Edit};
pub use export::{escape_html, export_file_name, render, Artifact};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    DashboardTile, Document, DocumentValidationError, EntryId, ExperienceEntry, ExperienceField,
    Personal, PersonalField, ProjectEntry, ProjectField, FIXED_TILES,
};
pub use model::image::{
    embed_profile_image, read_profile_image, ImageEmbedError, ImageFormat, ProfileImage,
    MAX_PROFILE_IMAGE_BYTES,
};
pub use repo::document_repo::{DocumentRepository, LoadSource, DOCUMENT_SLOT_KEY};
pub use repo::slot_repo::{MemorySlotRepository, SlotRepository, SqliteSlotRepository};
pub use repo::{RepoError, RepoResult};
pub use service::resume_service::ResumeService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
