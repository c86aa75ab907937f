use crate::application::error::{ErrorReport, HttpError};
use crate::domain::posts::PostSummaryEntry;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

pub const EMPTY_OVERVIEW_MESSAGE: &str = "No Posts yet :ε";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Render an error page for `error`, keeping its diagnostic report attached.
pub fn render_error_response(chrome: SiteChrome, error: HttpError) -> Response {
    let status = error.status();
    let content = ErrorPageView {
        status: status.as_u16(),
        message: error.public_message().to_string(),
    };
    let mut response = render_template_response(
        ErrorTemplate {
            view: LayoutContext::new(chrome, content),
        },
        status,
    );
    error.into_report().attach(&mut response);
    response
}

pub fn render_not_found_response(chrome: SiteChrome) -> Response {
    let content = ErrorPageView {
        status: StatusCode::NOT_FOUND.as_u16(),
        message: "The page you requested does not exist.".to_string(),
    };
    let mut response = render_template_response(
        ErrorTemplate {
            view: LayoutContext::new(chrome, content),
        },
        StatusCode::NOT_FOUND,
    );
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct SiteChrome {
    pub title: String,
}

pub struct LayoutContext<T> {
    pub chrome: SiteChrome,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: SiteChrome, content: T) -> Self {
        Self { chrome, content }
    }
}

#[derive(Clone)]
pub struct TagLink {
    pub label: String,
}

#[derive(Clone)]
pub struct PostCard {
    pub title: String,
    pub link: String,
    pub image: String,
    pub date: String,
    pub author: String,
    pub description: String,
    pub tags: Vec<TagLink>,
}

impl From<PostSummaryEntry> for PostCard {
    fn from(entry: PostSummaryEntry) -> Self {
        Self {
            title: entry.title,
            link: entry.link,
            image: entry.image,
            date: entry.date,
            author: entry.author,
            description: entry.description,
            tags: build_tag_links(entry.tags),
        }
    }
}

fn build_tag_links(tags: Vec<String>) -> Vec<TagLink> {
    tags.into_iter().map(|label| TagLink { label }).collect()
}

pub struct HomeView {
    pub latest: Vec<PostCard>,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeView>,
}

pub struct OverviewView {
    pub heading: String,
    pub posts: Vec<PostCard>,
    pub empty_message: &'static str,
}

impl OverviewView {
    pub fn new(heading: impl Into<String>, entries: Vec<PostSummaryEntry>) -> Self {
        Self {
            heading: heading.into(),
            posts: entries.into_iter().map(PostCard::from).collect(),
            empty_message: EMPTY_OVERVIEW_MESSAGE,
        }
    }
}

#[derive(Template)]
#[template(path = "blog_overview.html")]
pub struct OverviewTemplate {
    pub view: LayoutContext<OverviewView>,
}

pub struct PostDetailView {
    pub title: String,
    pub link: String,
    pub author: String,
    pub date: String,
    pub tags: Vec<TagLink>,
    pub content_html: String,
}

impl PostDetailView {
    pub fn new(entry: PostSummaryEntry, content_html: String) -> Self {
        Self {
            title: entry.title,
            link: entry.link,
            author: entry.author,
            date: entry.date,
            tags: build_tag_links(entry.tags),
            content_html,
        }
    }
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailView>,
}

pub struct ErrorPageView {
    pub status: u16,
    pub message: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> SiteChrome {
        SiteChrome {
            title: "Blog".to_string(),
        }
    }

    fn entry(name: &str, tags: &[&str]) -> PostSummaryEntry {
        PostSummaryEntry {
            name: name.to_string(),
            image: "/static/cover.png".to_string(),
            link: format!("/blog/posts/{name}"),
            title: format!("Title {name}"),
            date: "2024-01-01".to_string(),
            author: "Ada".to_string(),
            description: "About things".to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    #[test]
    fn empty_overview_shows_placeholder() {
        let html = OverviewTemplate {
            view: LayoutContext::new(chrome(), OverviewView::new("All posts", Vec::new())),
        }
        .render()
        .expect("render");

        assert!(html.contains(EMPTY_OVERVIEW_MESSAGE));
    }

    #[test]
    fn overview_lists_cards_with_tag_links() {
        let html = OverviewTemplate {
            view: LayoutContext::new(
                chrome(),
                OverviewView::new("All posts", vec![entry("hello", &["rust"])]),
            ),
        }
        .render()
        .expect("render");

        assert!(html.contains(r#"href="/blog/posts/hello""#));
        assert!(html.contains(r#"href="/blog/tagged/rust""#));
        assert!(!html.contains(EMPTY_OVERVIEW_MESSAGE));
    }

    #[test]
    fn post_page_embeds_rendered_html_verbatim() {
        let html = PostTemplate {
            view: LayoutContext::new(
                chrome(),
                PostDetailView::new(entry("hello", &[]), "<h1>Hi</h1>".to_string()),
            ),
        }
        .render()
        .expect("render");

        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("Title hello"));
    }

    #[test]
    fn error_response_keeps_status_and_report() {
        let error = HttpError::new(
            "test",
            StatusCode::NOT_FOUND,
            "Post not found",
            "post `x` does not exist",
        );
        let response = render_error_response(chrome(), error);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let report = response.extensions().get::<ErrorReport>().expect("report");
        assert_eq!(report.messages, ["post `x` does not exist"]);
    }
}
