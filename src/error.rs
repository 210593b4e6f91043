use std::{io, path::PathBuf};

use thiserror::Error;

/// `HostnameError` is returned by every fallible operation in the library.
/// The variants carry the path, pattern or platform facts needed to diagnose
/// a failed convergence without re-running it.
#[derive(Debug, Error)]
pub enum HostnameError {
    #[error("the hostname must not be empty")]
    EmptyHostname,

    #[error(
        "do not know how to set hostname on os {os}, platform {platform}, \
         platform_version {platform_version}, platform_family {platform_family}"
    )]
    UnsupportedPlatform {
        os: String,
        platform: String,
        platform_family: String,
        platform_version: String,
    },

    #[error("failed to read {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to replace lines matching `{pattern}` in {}", .path.display())]
    LineReplace {
        path: PathBuf,
        pattern: String,
        #[source]
        source: Box<HostnameError>,
    },

    #[error("failed to run `{command}`: {reason}")]
    Command { command: String, reason: String },

    #[error("invalid match pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl HostnameError {
    pub fn command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        HostnameError::Command {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HostnameError>;
