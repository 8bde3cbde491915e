//! # Tagstream Core
//!
//! Domain types, traits, and error definitions for the tagstream artifact
//! engine. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The engine's seams are defined as traits here: artifact kinds implement
//! [`ArtifactType`], the external markdown collaborator implements
//! [`TextRenderer`], and message persistence implements [`MessageStore`].
//! Implementations live in their respective crates, which keeps the
//! dependency graph pointing inward and lets tests substitute fakes.

pub mod artifact;
pub mod collaborator;
pub mod descriptor;
pub mod error;

// Re-export key types at crate root for ergonomics
pub use artifact::{Artifact, ParsedMessage, Theme};
pub use collaborator::{MessageStore, TextRenderer};
pub use descriptor::ArtifactType;
pub use error::{Error, RegistrationError, RenderError, Result, SessionError, StoreError};
