//! Résumé editing session service.
//!
//! # Responsibility
//! - Own the session document and route edits through the pure engine.
//! - Persist after every applied edit and clear storage on reset.
//! - Provide export and profile-image entry points for the editing surface.
//!
//! # Invariants
//! - `&mut self` on every mutating call keeps at most one edit in flight.
//! - A failed save never rolls back the in-memory document.
//! - A failed image embed leaves the document untouched.

use crate::engine::{self, Edit};
use crate::export::{self, Artifact};
use crate::model::document::Document;
use crate::model::image::{embed_profile_image, read_profile_image, ImageEmbedError, ProfileImage};
use crate::repo::document_repo::DocumentRepository;
use crate::repo::slot_repo::SlotRepository;
use log::{debug, error, warn};
use std::path::Path;

/// Single-writer session over one persisted résumé.
pub struct ResumeService<R: SlotRepository> {
    repo: DocumentRepository<R>,
    document: Document,
}

impl<R: SlotRepository> ResumeService<R> {
    /// Opens a session on the default document slot.
    pub fn open(slots: R) -> Self {
        Self::with_repository(DocumentRepository::new(slots))
    }

    /// Opens a session with an explicitly configured repository.
    pub fn with_repository(repo: DocumentRepository<R>) -> Self {
        let document = repo.load();
        Self { repo, document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn repository(&self) -> &DocumentRepository<R> {
        &self.repo
    }

    /// Applies one edit and persists the result.
    ///
    /// `Edit::Reset` also clears the persisted slot.
    pub fn apply(&mut self, edit: &Edit) -> &Document {
        if matches!(edit, Edit::Reset) {
            return self.reset();
        }

        self.document = engine::apply(&self.document, edit);
        debug!("event=edit_apply module=service status=ok op={}", edit.op_name());
        self.persist();
        &self.document
    }

    /// Decodes and applies one JSON instruction.
    ///
    /// Undecodable instructions are logged and leave the document unchanged.
    pub fn apply_json(&mut self, raw: &str) -> &Document {
        match Edit::from_json(raw) {
            Ok(edit) => self.apply(&edit),
            Err(err) => {
                warn!(
                    "event=edit_decode module=service status=ignored error_code=invalid_edit line={} column={}",
                    err.line(),
                    err.column()
                );
                &self.document
            }
        }
    }

    /// Embeds raw image bytes as the profile image.
    ///
    /// # Errors
    /// Returns the embed error; the document keeps its previous image.
    pub fn set_profile_image_bytes(&mut self, bytes: &[u8]) -> Result<&Document, ImageEmbedError> {
        let image = embed_profile_image(bytes)?;
        Ok(self.set_profile_image(image))
    }

    /// Reads and embeds an image file as the profile image.
    pub fn set_profile_image_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<&Document, ImageEmbedError> {
        let image = read_profile_image(path)?;
        Ok(self.set_profile_image(image))
    }

    /// Restores the template and removes the persisted slot.
    ///
    /// Callers obtain user confirmation before calling this.
    pub fn reset(&mut self) -> &Document {
        self.document = engine::reset();
        if let Err(err) = self.repo.clear() {
            error!(
                "event=document_clear module=service status=error error_code=slot_clear_failed error={err}"
            );
        }
        &self.document
    }

    /// Renders the current document.
    pub fn export(&self) -> Artifact {
        export::render(&self.document)
    }

    fn set_profile_image(&mut self, image: ProfileImage) -> &Document {
        self.apply(&Edit::SetProfileImage { image: Some(image) })
    }

    fn persist(&self) {
        if let Err(err) = self.repo.save(&self.document) {
            error!(
                "event=document_save module=service status=error error_code=slot_write_failed error={err}"
            );
        }
    }
}
