//! GigaChat content provider client
//!
//! Wraps the two provider operations the worksheet pipeline needs:
//! - `extract`: photographed pages -> worksheet body markup
//! - `regenerate`: existing body markup -> "variant 2" with new numbers
//!
//! Failures are typed ([`ProviderError`]) and checked by the caller before
//! any later pipeline stage runs; they are never embedded in the markup
//! payload.

mod client;
mod error;
pub mod prompts;

pub use client::{supports_images, GigaChatClient, ProviderConfig, MULTIMODAL_MODELS};
pub use error::ProviderError;
