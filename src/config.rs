use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the per-user history files live in.
    pub data_dir: PathBuf,

    pub classifier_url: String,
    pub classifier_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("MOODLOG_DATA_DIR")
                .unwrap_or_else(|_| ".".into())
                .into(),
            classifier_url: env::var("MOODLOG_CLASSIFIER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/predict".into()),
            classifier_timeout_secs: env::var("MOODLOG_CLASSIFIER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("MOODLOG_CLASSIFIER_TIMEOUT_SECS must be a number"),
        }
    }
}
