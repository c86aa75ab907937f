mod config;

use comrak::{Arena, format_html, parse_document};

use crate::application::render::types::{RenderError, RenderOptions, RenderService};

use config::{build_post_sanitizer, default_options};

/// Comrak-based renderer with optional Ammonia sanitisation.
pub struct ComrakRenderService {
    options: comrak::Options<'static>,
    sanitizer: Option<ammonia::Builder<'static>>,
}

impl ComrakRenderService {
    pub fn new(render: RenderOptions) -> Self {
        let sanitizer = render.sanitize_html.then(build_post_sanitizer);
        Self {
            options: default_options(),
            sanitizer,
        }
    }
}

impl Default for ComrakRenderService {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl RenderService for ComrakRenderService {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| RenderError::Markdown {
            message: err.to_string(),
        })?;

        Ok(match &self.sanitizer {
            Some(sanitizer) => sanitizer.clean(&html).to_string(),
            None => html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings() {
        let html = ComrakRenderService::default()
            .render("# Hi")
            .expect("render");
        assert!(html.contains("<h1>Hi</h1>"), "{html}");
    }

    #[test]
    fn autolinks_bare_urls() {
        let html = ComrakRenderService::default()
            .render("see https://example.com now")
            .expect("render");
        assert!(html.contains(r#"<a href="https://example.com">"#), "{html}");
    }

    #[test]
    fn applies_smart_punctuation() {
        let html = ComrakRenderService::default()
            .render("\"quoted\" -- text")
            .expect("render");
        assert!(html.contains('\u{201c}'), "{html}");
        assert!(html.contains('\u{2013}'), "{html}");
    }

    #[test]
    fn raw_html_passes_through_unless_sanitised() {
        let source = "<script>alert(1)</script>\n\ntext";

        let raw = ComrakRenderService::default().render(source).expect("render");
        assert!(raw.contains("<script>"), "{raw}");

        let clean = ComrakRenderService::new(RenderOptions {
            sanitize_html: true,
        })
        .render(source)
        .expect("render");
        assert!(!clean.contains("<script>"), "{clean}");
        assert!(clean.contains("<p>text</p>"), "{clean}");
    }
}
