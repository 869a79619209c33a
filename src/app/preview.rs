use std::sync::OnceLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use regex_lite::Regex;

/// Which widget is visible for the open document. Ephemeral UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Edit,
    Preview,
}

pub struct PreviewController {
    pub mode: ViewMode,
}

impl PreviewController {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::Edit,
        }
    }

    /// Flip between edit and preview. Returns the new mode.
    pub fn toggle(&mut self) -> ViewMode {
        self.mode = match self.mode {
            ViewMode::Edit => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Edit,
        };
        self.mode
    }

    /// Render markdown text to HTML ready for the preview widget.
    pub fn render_page(text: &str) -> String {
        wrap_html_for_helpview(&render_markdown(text))
    }

    /// Render the open document for the preview pane. Markdown files render
    /// to HTML; anything else shows as preformatted text.
    pub fn render_document(path: Option<&str>, text: &str) -> String {
        if path.is_none() || is_markdown_file(path) {
            Self::render_page(text)
        } else {
            wrap_html_for_helpview(&format!("<pre>{}</pre>", escape_html(text)))
        }
    }
}

impl Default for PreviewController {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert markdown to raw HTML.
///
/// Links render as underlined text, not anchors: `Fl_Help_View` follows
/// `<a href>` on its own, bypassing the wiki containment and unsaved-changes
/// checks. Wiki navigation goes through Ctrl+Enter in the editor instead.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Start(Tag::Link { .. }) => Event::InlineHtml("<u>".into()),
        Event::End(TagEnd::Link) => Event::InlineHtml("</u>".into()),
        event => event,
    });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Wrap HTML in HelpView-compatible font tags.
pub fn wrap_html_for_helpview(html: &str) -> String {
    format!("<font face=\"Helvetica\" size=\"4\">{}</font>", html)
}

/// Check if a file path points to a markdown file.
pub fn is_markdown_file(path: Option<&str>) -> bool {
    match path {
        Some(p) => {
            let lower = p.to_lowercase();
            lower.ends_with(".md") || lower.ends_with(".markdown") || lower.ends_with(".mdown")
        }
        None => false,
    }
}

/// Extract the destination of the first `[label](target)` link on a line.
/// Web and file URLs are not wiki navigation targets and return None.
pub fn link_target(line: &str) -> Option<String> {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINK_RE.get_or_init(|| Regex::new(r"\[[^\]]*\]\(([^)]+)\)").unwrap());

    let target = re.captures(line)?.get(1)?.as_str().trim();
    if target.is_empty()
        || target.starts_with("http://")
        || target.starts_with("https://")
        || target.starts_with("file://")
    {
        return None;
    }
    Some(target.to_string())
}

/// Markup shown in the preview pane before any file is opened.
pub fn empty_preview_html() -> String {
    wrap_html_for_helpview("<p>Open a Markdown file to see preview</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let html = render_markdown("# Title\n\nSome *text*.\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_render_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_rendered_links_are_inert() {
        // The preview widget would follow a live href itself
        let html = render_markdown("see [Other page](other.md) and [web](https://example.com)");
        assert!(!html.contains("<a "));
        assert!(!html.contains("href="));
        assert!(html.contains("<u>Other page</u>"));
        assert!(html.contains("<u>web</u>"));
    }

    #[test]
    fn test_render_document_by_file_type() {
        let markdown = PreviewController::render_document(Some("page.md"), "# Title");
        assert!(markdown.contains("<h1>Title</h1>"));

        let plain = PreviewController::render_document(Some("notes.txt"), "a < b");
        assert!(plain.contains("<pre>a &lt; b</pre>"));

        // Unsaved buffers still render as markdown
        let unsaved = PreviewController::render_document(None, "# Draft");
        assert!(unsaved.contains("<h1>Draft</h1>"));
    }

    #[test]
    fn test_render_page_wraps_font() {
        let page = PreviewController::render_page("hello");
        assert!(page.starts_with("<font face=\"Helvetica\""));
        assert!(page.contains("<p>hello</p>"));
    }

    #[test]
    fn test_toggle_flips_mode() {
        let mut preview = PreviewController::new();
        assert_eq!(preview.mode, ViewMode::Edit);
        assert_eq!(preview.toggle(), ViewMode::Preview);
        assert_eq!(preview.toggle(), ViewMode::Edit);
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file(Some("notes.md")));
        assert!(is_markdown_file(Some("NOTES.MARKDOWN")));
        assert!(is_markdown_file(Some("a/b/c.mdown")));
        assert!(!is_markdown_file(Some("notes.txt")));
        assert!(!is_markdown_file(None));
    }

    #[test]
    fn test_link_target_relative() {
        assert_eq!(
            link_target("see [the index](index.md) for more"),
            Some("index.md".to_string())
        );
        assert_eq!(
            link_target("[nested](notes/inner.md)"),
            Some("notes/inner.md".to_string())
        );
    }

    #[test]
    fn test_link_target_skips_urls() {
        assert_eq!(link_target("[web](https://example.com)"), None);
        assert_eq!(link_target("[web](http://example.com)"), None);
        assert_eq!(link_target("[local](file:///tmp/x.md)"), None);
    }

    #[test]
    fn test_link_target_no_link() {
        assert_eq!(link_target("plain text line"), None);
        assert_eq!(link_target("[just brackets]"), None);
    }
}
