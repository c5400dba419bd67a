//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Template and rich-text
//! queries are always scoped by the owning user key.

pub mod rich_text_repo;
pub mod template_repo;
pub mod user_repo;

pub use rich_text_repo::RichTextRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
