//! Crate-level error types.

use std::fmt;

use crate::camera::CameraError;
use crate::command::CommandError;
use crate::gpu::RenderContextError;

/// Errors produced by the molview crate.
#[derive(Debug)]
pub enum MolviewError {
    /// GPU context acquisition failure (fatal at construction).
    Context(RenderContextError),
    /// Camera misconfiguration (invalid clip planes).
    Camera(CameraError),
    /// Command bus registration or dispatch failure.
    Command(CommandError),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Windowed host / event-loop failure.
    Host(String),
}

impl fmt::Display for MolviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context(e) => write!(f, "GPU context error: {e}"),
            Self::Camera(e) => write!(f, "camera error: {e}"),
            Self::Command(e) => write!(f, "command error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for MolviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context(e) => Some(e),
            Self::Camera(e) => Some(e),
            Self::Command(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MolviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Context(e)
    }
}

impl From<CameraError> for MolviewError {
    fn from(e: CameraError) -> Self {
        Self::Camera(e)
    }
}

impl From<CommandError> for MolviewError {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

impl From<std::io::Error> for MolviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
