//! CLI error type and its exit codes.
//!
//! | code | meaning |
//! |------|---------|
//! | 2    | clap rejected the arguments |
//! | 10   | the image could not be built or encoded |
//! | 11   | reading a seed file or writing a PNG failed |
//! | 12   | a flag value or `--params` object was unusable |
//! | 13   | JSON output could not be produced |
//! | 14   | a batch wrote some images but not all |

use gradient_png_render::error::RenderError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Source construction or PNG encoding failed. File writes are split out
    /// into [`CliError::Io`] on conversion.
    Render(RenderError),
    Io(String),
    /// Rejected before any source was built.
    Input(String),
    Serialization(String),
    Batch { failed: usize, total: usize },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::Batch { .. } => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(msg) => write!(f, "json output: {msg}"),
            CliError::Batch { failed, total } => {
                write!(f, "{failed} of {total} images failed")
            }
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Io(msg) => CliError::Io(msg),
            other => CliError::Render(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
