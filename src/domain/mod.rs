//! Domain layer with core entities, services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{ContentNode, LinkMatch, SyntheticSticker};
pub use errors::{RecodeError, TransformError, UploadError};
pub use services::LinkClassifier;
