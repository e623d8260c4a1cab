use std::time::Duration;

use serde::Deserialize;

use super::MoodClassifier;
use crate::error::{MoodError, MoodResult};
use crate::models::mood::Mood;

#[derive(Debug, Deserialize)]
struct PredictResponse {
    label: String,
}

/// Adapter for a prediction service reachable over HTTP.
///
/// Sends the raw text as JSON and expects `{"label": "<mood>"}` back. A
/// label outside the enumerated set is a classification error carrying the
/// raw label; nothing gets persisted for it.
pub struct HttpClassifier {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> MoodResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MoodError::Classification(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl MoodClassifier for HttpClassifier {
    fn predict(&self, text: &str) -> MoodResult<Mood> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .map_err(|e| MoodError::Classification(format!("Classifier unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(MoodError::Classification(format!(
                "Classifier returned {}: {}",
                status, body
            )));
        }

        let predicted: PredictResponse = response.json().map_err(|e| {
            MoodError::Classification(format!("Malformed classifier response: {}", e))
        })?;

        predicted.label.parse()
    }
}
