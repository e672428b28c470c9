//! Recognizer module wrapping the external Laia HTR decoder.
//!
//! One invocation decodes every image listed in a manifest and prints one line
//! per image, in manifest order, followed by a trailing blank line. Nothing in
//! the output ties a line to an image other than its position.

mod error;
mod laia;
mod traits;

pub use error::RecognizerError;
pub use laia::LaiaRecognizer;
pub use traits::Recognizer;
