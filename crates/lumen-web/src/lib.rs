//! Browser host for the lumen engine.
//!
//! Creates an 800x600 canvas, acquires a WebGL 1 context and draws the square
//! once on module start. Only meaningful on `wasm32`.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::start;

/// Text thrown to the page when startup fails: the whole context chain on one line.
///
/// Shader diagnostics inside the chain have already been logged by the engine,
/// so the host does not log them again.
pub fn failure_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use lumen_engine::device::RecordingContext;
    use lumen_engine::{RenderConfig, render_square};

    #[test]
    fn link_diagnostic_appears_once_in_message() {
        let ctx = RecordingContext::new().failing_link();
        let err = render_square(&ctx, &RenderConfig::default())
            .context("rendering the square")
            .unwrap_err();

        let message = failure_message(&err);
        assert!(message.starts_with("rendering the square: "), "{message}");
        assert_eq!(message.matches("ERROR: link failed").count(), 1, "{message}");
    }
}
