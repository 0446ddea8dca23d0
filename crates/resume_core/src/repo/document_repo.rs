//! Document persistence over one durable slot.
//!
//! # Responsibility
//! - Load the session document, falling back to the template.
//! - Overwrite or clear the persisted copy.
//!
//! # Invariants
//! - `load` always returns a document that passes `Document::validate()`.
//! - Fallback paths log metadata only, never slot content.

use crate::model::document::Document;
use crate::repo::slot_repo::SlotRepository;
use crate::repo::RepoResult;
use log::{error, info, warn};

/// Fixed key of the slot holding the résumé document.
pub const DOCUMENT_SLOT_KEY: &str = "resume-builder-data";

/// Outcome of one `load` call, kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Slot content decoded and validated.
    Stored,
    /// Slot was absent.
    MissingSlot,
    /// Slot content was not a structurally valid document.
    CorruptSlot,
    /// Slot could not be read from storage.
    ReadFailed,
}

/// Reads and writes the document through a slot repository.
pub struct DocumentRepository<R: SlotRepository> {
    slots: R,
    key: String,
}

impl<R: SlotRepository> DocumentRepository<R> {
    /// Creates a repository bound to [`DOCUMENT_SLOT_KEY`].
    pub fn new(slots: R) -> Self {
        Self::with_key(slots, DOCUMENT_SLOT_KEY)
    }

    pub fn with_key(slots: R, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn slots(&self) -> &R {
        &self.slots
    }

    /// Loads the persisted document, or the template when none is usable.
    pub fn load(&self) -> Document {
        self.load_with_source().0
    }

    /// Same as [`load`](Self::load) but also reports where the document came from.
    pub fn load_with_source(&self) -> (Document, LoadSource) {
        let raw = match self.slots.read_slot(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=document_load module=repo status=ok source=template reason=missing_slot"
                );
                return (Document::template(), LoadSource::MissingSlot);
            }
            Err(err) => {
                error!(
                    "event=document_load module=repo status=fallback source=template error_code=slot_read_failed error={err}"
                );
                return (Document::template(), LoadSource::ReadFailed);
            }
        };

        // serde messages can quote slot content; only category and position are logged.
        let decoded = serde_json::from_str::<Document>(&raw)
            .map_err(|err| {
                format!(
                    "decode_{:?} line={} column={}",
                    err.classify(),
                    err.line(),
                    err.column()
                )
                .to_ascii_lowercase()
            })
            .and_then(|doc| {
                doc.validate()
                    .map(|()| doc)
                    .map_err(|err| format!("invalid_document detail=\"{err}\""))
            });

        match decoded {
            Ok(doc) => {
                info!(
                    "event=document_load module=repo status=ok source=slot bytes={} experience={} projects={}",
                    raw.len(),
                    doc.experience.len(),
                    doc.projects.len()
                );
                (doc, LoadSource::Stored)
            }
            Err(reason) => {
                warn!(
                    "event=document_load module=repo status=fallback source=template error_code=slot_corrupt bytes={} reason={}",
                    raw.len(),
                    reason
                );
                (Document::template(), LoadSource::CorruptSlot)
            }
        }
    }

    /// Overwrites the slot with the serialized document.
    pub fn save(&self, doc: &Document) -> RepoResult<()> {
        let encoded = serde_json::to_string(doc)?;
        self.slots.write_slot(&self.key, &encoded)?;
        info!(
            "event=document_save module=repo status=ok bytes={}",
            encoded.len()
        );
        Ok(())
    }

    /// Removes the persisted slot entirely.
    pub fn clear(&self) -> RepoResult<()> {
        self.slots.remove_slot(&self.key)?;
        info!("event=document_clear module=repo status=ok");
        Ok(())
    }
}
