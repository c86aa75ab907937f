use thiserror::Error;

/// Knobs that change the rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Run the rendered HTML through an allow-list sanitiser. Raw HTML in the
    /// source passes through untouched when this is off.
    pub sanitize_html: bool,
}

impl From<&crate::config::RenderSettings> for RenderOptions {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            sanitize_html: settings.sanitize_html,
        }
    }
}

/// Structured errors surfaced by the rendering pipeline.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
}

/// Implementations must be deterministic: the same markdown yields the same
/// HTML or the same error.
pub trait RenderService: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}
