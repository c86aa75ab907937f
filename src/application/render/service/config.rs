use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

/// GFM extensions with smart punctuation. Raw HTML is emitted as written.
pub(crate) fn default_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

pub(crate) fn build_post_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "abbr",
        "blockquote",
        "br",
        "code",
        "del",
        "div",
        "em",
        "figcaption",
        "figure",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "input",
        "kbd",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "section",
        "span",
        "strong",
        "sub",
        "sup",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "u",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> =
        HashSet::from(["class", "id", "title", "lang", "dir", "aria-hidden", "role"]);
    builder.generic_attributes(generic);

    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("img", &["title", "width", "height", "alt", "loading"]);
    builder.add_tag_attributes("code", &["data-language"]);
    builder.add_tag_attributes("pre", &["lang"]);
    builder.add_tag_attributes("th", &["align", "colspan", "rowspan", "scope"]);
    builder.add_tag_attributes("td", &["align", "colspan", "rowspan"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);

    builder.add_url_schemes(["http", "https", "mailto", "tel"].iter().copied());

    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.tagfilter = false;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;

    options.parse.smart = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    render.r#unsafe = true;
}

#[cfg(test)]
mod tests {
    #[test]
    fn post_sanitizer_preserves_strikethrough() {
        let sanitizer = super::build_post_sanitizer();
        let html = sanitizer
            .clean("<p><del>Removed</del> text</p>")
            .to_string();

        assert!(html.contains("<del>Removed</del>"));
    }

    #[test]
    fn post_sanitizer_drops_event_handlers() {
        let sanitizer = super::build_post_sanitizer();
        let html = sanitizer
            .clean(r#"<img src="/a.png" onerror="alert(1)" alt="a">"#)
            .to_string();

        assert!(!html.contains("onerror"));
        assert!(html.contains(r#"alt="a""#));
    }
}
