//! Briefing loader.
//!
//! The briefing is the instruction context for a conference: an opaque text
//! that tells the model who it is and what the conference is about. It is
//! read from a file, or from stdin when the path is `-`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncReadExt;

/// Where the briefing comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BriefingSource {
    File(PathBuf),
    Stdin,
}

impl BriefingSource {
    /// `-` means stdin; anything else is a path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            BriefingSource::Stdin
        } else {
            BriefingSource::File(arg.to_path_buf())
        }
    }

    /// Replies are read from stdin after the briefing. Reading the briefing
    /// from a piped stdin would leave nothing to answer with, so that
    /// combination is refused.
    pub fn ensure_replies_readable(&self, stdin_is_terminal: bool) -> Result<(), BriefingError> {
        match self {
            BriefingSource::Stdin if !stdin_is_terminal => Err(BriefingError::StdinNotInteractive),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for BriefingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BriefingSource::File(path) => write!(f, "{}", path.display()),
            BriefingSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BriefingError {
    #[error("failed to read briefing from {source_name}: {error}")]
    Read {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("briefing from {0} is empty")]
    Empty(String),

    #[error("cannot read the briefing from stdin when stdin is not a terminal: replies are read from stdin too; pass the briefing as a file")]
    StdinNotInteractive,
}

/// Read the briefing text. Surrounding whitespace is trimmed; an empty
/// briefing is an error.
pub async fn load_briefing(source: &BriefingSource) -> Result<String, BriefingError> {
    let read = match source {
        BriefingSource::File(path) => tokio::fs::read_to_string(path).await,
        BriefingSource::Stdin => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await.map(|_| text)
        }
    };

    let text = read.map_err(|error| BriefingError::Read {
        source_name: source.to_string(),
        error,
    })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(BriefingError::Empty(source.to_string()));
    }
    tracing::debug!(source = %source, chars = text.len(), "briefing loaded");
    Ok(text.to_string())
}
