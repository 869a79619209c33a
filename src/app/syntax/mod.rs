mod style_map;

use std::path::Path;

use fltk::enums::Font;
use fltk::text::StyleTableEntry;
use syntect::highlighting::{HighlightIterator, HighlightState, Highlighter, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxSet};

use style_map::StyleMap;

const DARK_THEME: &str = "base16-ocean.dark";
const LIGHT_THEME: &str = "base16-ocean.light";

/// Token-level highlighter for the editor. Wiki pages are small, so every
/// pass highlights the whole buffer; the dispatch loop debounces calls.
pub struct MarkdownHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    style_map: StyleMap,
}

impl MarkdownHighlighter {
    pub fn new(is_dark: bool, font: Font, font_size: i32) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme_for(is_dark).to_string(),
            style_map: StyleMap::new(font, font_size),
        }
    }

    /// Detect the syntax for a file path based on extension.
    pub fn detect_syntax(&self, file_path: &str) -> Option<String> {
        let ext = Path::new(file_path).extension()?.to_str()?;
        let syntax = self.syntax_set.find_syntax_by_extension(ext)?;
        if syntax.name == "Plain Text" {
            return None;
        }
        Some(syntax.name.clone())
    }

    /// Highlight the whole text. Returns one style character per byte, so the
    /// result always lines up with the FLTK style buffer.
    pub fn highlight(&mut self, text: &str, syntax_name: &str) -> String {
        let syntax = match self.syntax_set.find_syntax_by_name(syntax_name) {
            Some(s) => s.clone(),
            None => return default_style(text),
        };

        let theme = &self.theme_set.themes[&self.theme_name];
        let highlighter = Highlighter::new(theme);
        let mut parse_state = ParseState::new(&syntax);
        let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
        let mut style_string = String::with_capacity(text.len());

        for line in LinesWithEndings::new(text) {
            let ops = parse_state
                .parse_line(line, &self.syntax_set)
                .unwrap_or_default();
            let iter = HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter);
            for (style, piece) in iter {
                let ch = self.style_map.char_for(style.foreground);
                // One style char per byte (not per char) for UTF-8 correctness
                for _ in 0..piece.len() {
                    style_string.push(ch);
                }
            }
        }

        style_string
    }

    /// Switch theme for dark/light mode. Clears the style map.
    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.theme_name = theme_for(is_dark).to_string();
        self.style_map.clear();
    }

    /// Update the font used in style table entries.
    pub fn set_font(&mut self, font: Font, size: i32) {
        self.style_map.update_font(font, size);
    }

    /// Get the style table for FLTK's set_highlight_data.
    pub fn style_table(&self) -> Vec<StyleTableEntry> {
        self.style_map.entries().to_vec()
    }
}

fn theme_for(is_dark: bool) -> &'static str {
    if is_dark { DARK_THEME } else { LIGHT_THEME }
}

/// Style string for text with no syntax: everything gets the default entry.
pub fn default_style(text: &str) -> String {
    std::iter::repeat('A').take(text.len()).collect()
}

/// Iterator that yields lines including their line endings.
struct LinesWithEndings<'a> {
    text: &'a str,
}

impl<'a> LinesWithEndings<'a> {
    fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> Iterator for LinesWithEndings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.text.is_empty() {
            return None;
        }
        let end = self.text.find('\n').map(|i| i + 1).unwrap_or(self.text.len());
        let line = &self.text[..end];
        self.text = &self.text[end..];
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_highlighter() -> MarkdownHighlighter {
        MarkdownHighlighter::new(false, Font::Courier, 16)
    }

    #[test]
    fn test_detect_markdown_syntax() {
        let hl = test_highlighter();
        assert_eq!(hl.detect_syntax("notes/index.md"), Some("Markdown".to_string()));
        assert_eq!(hl.detect_syntax("README"), None);
        assert_eq!(hl.detect_syntax("image.xyz123"), None);
    }

    #[test]
    fn test_style_string_covers_every_byte() {
        let mut hl = test_highlighter();
        let text = "# Héading\n\nsome `code` and [a link](page.md)\n";
        let styles = hl.highlight(text, "Markdown");
        assert_eq!(styles.len(), text.len());
    }

    #[test]
    fn test_unknown_syntax_falls_back_to_default() {
        let mut hl = test_highlighter();
        let text = "plain text";
        let styles = hl.highlight(text, "No Such Syntax");
        assert_eq!(styles, "AAAAAAAAAA");
    }

    #[test]
    fn test_markdown_heading_uses_non_default_style() {
        let mut hl = test_highlighter();
        let styles = hl.highlight("# Heading\n", "Markdown");
        assert!(styles.chars().any(|c| c != 'A'));
    }

    #[test]
    fn test_theme_switch_resets_style_table() {
        let mut hl = test_highlighter();
        let _ = hl.highlight("# Heading\n\n*em*\n", "Markdown");
        assert!(hl.style_table().len() > 1);

        hl.set_dark_mode(true);
        assert_eq!(hl.style_table().len(), 1);
    }

    #[test]
    fn test_lines_with_endings() {
        let lines: Vec<&str> = LinesWithEndings::new("a\nb\nc").collect();
        assert_eq!(lines, vec!["a\n", "b\n", "c"]);
    }
}
