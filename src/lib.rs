//! `FakeNitro` - local emulation of premium emoji and stickers.
//!
//! This crate turns fake emoji and sticker links in received messages back
//! into rich widgets, and degrades premium content in outgoing messages to
//! links, recoding animated stickers into GIF uploads where needed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing render and send path services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing file, registry and codec adapters.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "fakenitro";
