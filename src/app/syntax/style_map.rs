use std::collections::HashMap;

use fltk::enums::{Color, Font};
use fltk::text::StyleTableEntry;
use syntect::highlighting::Color as SyntectColor;

/// Maps syntect foreground colors to FLTK style characters ('A', 'B', ...),
/// building the StyleTableEntry table as new colors show up. Entry 'A' is
/// always the default foreground.
pub struct StyleMap {
    color_to_char: HashMap<(u8, u8, u8), char>,
    entries: Vec<StyleTableEntry>,
    font: Font,
    font_size: i32,
}

// FLTK style chars can go past 'Z', but a syntect theme never yields
// anywhere near 26 distinct foregrounds.
const MAX_ENTRIES: usize = 26;

impl StyleMap {
    pub fn new(font: Font, font_size: i32) -> Self {
        let mut map = Self {
            color_to_char: HashMap::new(),
            entries: Vec::new(),
            font,
            font_size,
        };
        map.insert_default();
        map
    }

    /// Style character for a color, registering a new table entry if needed.
    pub fn char_for(&mut self, color: SyntectColor) -> char {
        let key = (color.r, color.g, color.b);
        if let Some(&ch) = self.color_to_char.get(&key) {
            return ch;
        }

        let idx = self.entries.len();
        if idx >= MAX_ENTRIES {
            return (b'A' + (MAX_ENTRIES - 1) as u8) as char;
        }

        let ch = (b'A' + idx as u8) as char;
        self.entries.push(StyleTableEntry {
            color: Color::from_rgb(color.r, color.g, color.b),
            font: self.font,
            size: self.font_size,
        });
        self.color_to_char.insert(key, ch);
        ch
    }

    pub fn entries(&self) -> &[StyleTableEntry] {
        &self.entries
    }

    /// Drop all mappings (used on theme change).
    pub fn clear(&mut self) {
        self.color_to_char.clear();
        self.entries.clear();
        self.insert_default();
    }

    /// Update font info for all entries.
    pub fn update_font(&mut self, font: Font, size: i32) {
        self.font = font;
        self.font_size = size;
        for entry in &mut self.entries {
            entry.font = font;
            entry.size = size;
        }
    }

    fn insert_default(&mut self) {
        self.entries.push(StyleTableEntry {
            color: Color::Foreground,
            font: self.font,
            size: self.font_size,
        });
        self.color_to_char.insert((0, 0, 0), 'A');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> SyntectColor {
        SyntectColor { r, g, b, a: 255 }
    }

    #[test]
    fn test_same_color_same_char() {
        let mut map = StyleMap::new(Font::Courier, 16);
        let a = map.char_for(rgb(10, 20, 30));
        let b = map.char_for(rgb(10, 20, 30));
        assert_eq!(a, b);
        assert_eq!(map.entries().len(), 2);
    }

    #[test]
    fn test_new_colors_get_new_chars() {
        let mut map = StyleMap::new(Font::Courier, 16);
        let b = map.char_for(rgb(1, 1, 1));
        let c = map.char_for(rgb(2, 2, 2));
        assert_eq!(b, 'B');
        assert_eq!(c, 'C');
    }

    #[test]
    fn test_clear_keeps_default_entry() {
        let mut map = StyleMap::new(Font::Courier, 16);
        map.char_for(rgb(1, 1, 1));
        map.clear();
        assert_eq!(map.entries().len(), 1);
        assert_eq!(map.char_for(rgb(0, 0, 0)), 'A');
    }

    #[test]
    fn test_update_font_rewrites_entries() {
        let mut map = StyleMap::new(Font::Courier, 16);
        map.char_for(rgb(1, 1, 1));
        map.update_font(Font::Screen, 20);
        assert!(map.entries().iter().all(|e| e.size == 20));
    }
}
