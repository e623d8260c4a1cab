use std::fmt;

/// Store operation a failure occurred in, named in user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Append,
    Load,
    Reset,
    Export,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::Append => "append",
            StoreOp::Load => "load",
            StoreOp::Reset => "reset",
            StoreOp::Export => "export",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MoodError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Storage error during {op}: {source}")]
    Storage {
        op: StoreOp,
        #[source]
        source: anyhow::Error,
    },
}

impl MoodError {
    pub fn storage(op: StoreOp, source: impl Into<anyhow::Error>) -> Self {
        Self::Storage {
            op,
            source: source.into(),
        }
    }
}

pub type MoodResult<T> = Result<T, MoodError>;
