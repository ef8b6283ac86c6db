//! Error type shared by every fallible startup step.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Shader stage a compile error was reported for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Fatal errors raised while bringing the visualizer up.
#[derive(Error, Debug)]
pub enum VizError {
    /// Windowing, surface, adapter or device setup failed.
    #[error("initialization failed: {0}")]
    Init(String),

    #[error("{stage} shader compilation error:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("program link error:\n{log}")]
    Link { log: String },

    #[error("could not open file [{}]: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file yielded fewer bytes than its metadata reported.
    #[error("error reading file [{}]: expected {expected} bytes, got {read}", .path.display())]
    ShortRead {
        path: PathBuf,
        expected: u64,
        read: u64,
    },

    #[error("canvas dimension {dimension} exceeds the GPU texture limit of {max}")]
    TextureTooLarge { dimension: u64, max: u32 },
}

impl VizError {
    /// Whether this error came from reading the source file.
    pub fn is_file_read(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::ShortRead { .. })
    }
}

pub type Result<T> = std::result::Result<T, VizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_classification() {
        let missing = VizError::FileRead {
            path: PathBuf::from("nope.bin"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let short = VizError::ShortRead {
            path: PathBuf::from("short.bin"),
            expected: 10,
            read: 4,
        };
        assert!(missing.is_file_read());
        assert!(short.is_file_read());
        assert!(!VizError::Init("no adapter".into()).is_file_read());
    }

    #[test]
    fn test_messages_carry_diagnostics() {
        let err = VizError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "unknown identifier `tex`".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("fragment shader compilation error"));
        assert!(msg.contains("unknown identifier `tex`"));

        let short = VizError::ShortRead {
            path: PathBuf::from("data.bin"),
            expected: 300,
            read: 120,
        };
        assert_eq!(
            short.to_string(),
            "error reading file [data.bin]: expected 300 bytes, got 120"
        );
    }
}
