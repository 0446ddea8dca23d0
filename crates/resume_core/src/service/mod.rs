//! Use-case services for the editing surface.
//!
//! # Responsibility
//! - Sequence load, edit, persist and export into one session API.
//! - Keep callers decoupled from storage and rendering details.

pub mod resume_service;
