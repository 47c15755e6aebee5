//! Shared worksheet types and pure pipeline steps
//!
//! This crate holds the pieces of the worksheet pipeline that have no I/O:
//! - Layout sizing (how tall the handwriting field is for N tasks per page)
//! - Provider output sanitizing (code-fence stripping)
//! - Common request/metadata types shared between the engine and the API

pub mod layout;
pub mod sanitize;
pub mod types;

pub use layout::{clamp_task_count, grid_height_mm};
pub use sanitize::sanitize;
pub use types::{Difficulty, SourceImage};
