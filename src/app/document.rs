use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::app::Sender;
use fltk::text::TextBuffer;

use super::buffer_utils::buffer_text_no_leak;
use super::error::Result;
use super::messages::Message;

/// The text currently loaned into the editor. The only in-memory model is the
/// FLTK buffer itself; `save` writes it back to disk.
pub struct Document {
    pub buffer: TextBuffer,
    /// Parallel buffer of style characters, one per byte of `buffer`.
    pub style_buffer: TextBuffer,
    pub file_path: Option<PathBuf>,
    pub has_unsaved_changes: Rc<Cell<bool>>,
    pub display_name: String,
}

impl Document {
    pub fn new(sender: Sender<Message>) -> Self {
        let mut buffer = TextBuffer::default();
        let style_buffer = TextBuffer::default();
        let has_unsaved_changes = Rc::new(Cell::new(false));

        // Mark dirty, keep the style buffer the same length as the text,
        // and let the dispatch loop schedule a rehighlight.
        let changes = has_unsaved_changes.clone();
        let mut style_buf = style_buffer.clone();
        buffer.add_modify_callback(move |pos, inserted, deleted, _restyled, _deleted_text| {
            if inserted > 0 || deleted > 0 {
                changes.set(true);
                if inserted > 0 {
                    let filler: String = std::iter::repeat('A').take(inserted as usize).collect();
                    style_buf.insert(pos, &filler);
                }
                if deleted > 0 {
                    style_buf.remove(pos, pos + deleted);
                }
                sender.send(Message::BufferModified(pos));
            }
        });

        Self {
            buffer,
            style_buffer,
            file_path: None,
            has_unsaved_changes,
            display_name: String::new(),
        }
    }

    /// Bind the document to a file on disk and load its contents.
    pub fn load(&mut self, path: PathBuf, content: &str) {
        self.buffer.set_text(content);
        let default_style: String = std::iter::repeat('A').take(content.len()).collect();
        self.style_buffer.set_text(&default_style);
        self.display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
            .to_string();
        self.file_path = Some(path);
        self.has_unsaved_changes.set(false);
    }

    /// Write the buffer back to the bound file. Callers check `file_path` first.
    pub fn save(&self) -> Result<()> {
        if let Some(ref path) = self.file_path {
            fs::write(path, buffer_text_no_leak(&self.buffer))?;
            self.has_unsaved_changes.set(false);
        }
        Ok(())
    }

    /// Point the document at a new path without touching the buffer.
    /// Used when the open file is renamed on disk.
    pub fn rebind(&mut self, path: PathBuf) {
        self.display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Unknown")
            .to_string();
        self.file_path = Some(path);
    }

    /// Unbind from the current file and empty the editor.
    pub fn clear(&mut self) {
        self.buffer.set_text("");
        self.style_buffer.set_text("");
        self.file_path = None;
        self.display_name.clear();
        self.has_unsaved_changes.set(false);
    }

    pub fn is_dirty(&self) -> bool {
        self.has_unsaved_changes.get()
    }

    pub fn mark_clean(&self) {
        self.has_unsaved_changes.set(false);
    }
}
