pub mod http;

pub use http::HttpClassifier;

use crate::error::MoodResult;
use crate::models::mood::Mood;

/// Boundary to the external text-to-mood model.
///
/// Implementations classify one text at a time; no batching or streaming.
/// Callers only invoke this with validated non-empty text, and append an
/// entry only after a label comes back successfully.
pub trait MoodClassifier {
    fn predict(&self, text: &str) -> MoodResult<Mood>;
}
