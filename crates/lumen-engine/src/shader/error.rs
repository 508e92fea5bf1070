use super::ShaderStage;

/// Failure while building a shader program.
///
/// Compile and link variants carry the driver's info log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShaderError {
    #[error("unrecognized shader stage `{0}`")]
    InvalidStage(String),

    #[error("{found} shader supplied where a {expected} shader is required")]
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },

    #[error("failed to create {what}: {message}")]
    Create { what: &'static str, message: String },

    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("program failed to link: {log}")]
    Link { log: String },
}

/// Drivers may return an empty info log on failure; never surface an empty diagnostic.
pub(crate) fn diagnostic(log: String, fallback: &str) -> String {
    let trimmed = log.trim();
    if trimmed.is_empty() { fallback.to_string() } else { trimmed.to_string() }
}
