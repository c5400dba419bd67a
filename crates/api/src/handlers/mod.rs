//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the corresponding repository in `promptforge_db` or to the pure
//! logic in `promptforge_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod builder;
pub mod generate;
pub mod library;
pub mod preview;
pub mod templates;
