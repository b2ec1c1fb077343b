#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Indic Game Generator.
//!
//! This crate hosts the fixed catalog, game record construction, HTML
//! export, configuration handling and the host-owned session state used by
//! the terminal UI and any future frontends.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod session;
pub mod translate;

pub use builder::GenerationStage;
pub use catalog::LanguageEntry;
pub use config::AppConfig;
pub use error::{FormField, ValidationError};
pub use export::{ExportEntry, ExportManager};
pub use models::{GameForm, GameRecord, PrebuiltGame};
pub use session::SessionState;
pub use translate::translate;
