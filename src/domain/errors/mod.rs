//! Domain error types.

mod recode_error;
mod transform_error;
mod upload_error;

pub use recode_error::RecodeError;
pub use transform_error::TransformError;
pub use upload_error::UploadError;
