//! Domain logic for prompt templates: the template model, the interactive
//! field editor, the substitution engine, and the structural form preview.
//!
//! This crate is pure and synchronous. Persistence, identity, and HTTP live
//! in `promptforge-db` and `promptforge-api`.

pub mod builtin;
pub mod editor;
pub mod error;
pub mod preview;
pub mod render;
pub mod template;
pub mod types;
