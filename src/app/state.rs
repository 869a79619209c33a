use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use fltk::{
    app::Sender,
    dialog,
    enums::Font,
    frame::Frame,
    group::Group,
    menu::{MenuBar, MenuFlag},
    misc::HelpView,
    prelude::*,
    text::TextEditor,
    window::Window,
};

use super::buffer_utils::buffer_text_no_leak;
use super::document::Document;
use super::error::AppError;
use super::messages::Message;
use super::preview::{self, PreviewController, ViewMode};
use super::settings::{AppSettings, FontChoice, ThemeMode};
use super::syntax::{self, MarkdownHighlighter};
use super::workspace::{MoveOutcome, RenameOutcome, Workspace};
use crate::ui::dialogs::about::show_about_dialog;
use crate::ui::file_dialogs::{choose_wiki_folder, prompt_for_name};
use crate::ui::main_window::MainWidgets;
use crate::ui::nav_tree::NavTree;
use crate::ui::theme::{ThemeWidgets, apply_theme};
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// Delay between the last keystroke and the highlight pass.
const REHIGHLIGHT_DELAY: f64 = 0.2;

pub struct AppState {
    pub workspace: Option<Workspace>,
    pub document: Document,
    pub preview: PreviewController,
    pub highlighter: MarkdownHighlighter,
    pub nav: NavTree,
    pub editor: TextEditor,
    pub preview_view: HelpView,
    pub stack: Group,
    pub window: Window,
    pub menu: MenuBar,
    pub status_frame: Frame,
    pub sender: Sender<Message>,
    pub settings: Rc<RefCell<AppSettings>>,
    pub dark_mode: bool,
    /// Source path armed by Cut Entry, consumed by Paste Entry.
    pub cut_source: Option<PathBuf>,
    recent_labels: Vec<String>,
    rehighlight_pending: bool,
}

impl AppState {
    pub fn new(
        widgets: MainWidgets,
        sender: Sender<Message>,
        settings: Rc<RefCell<AppSettings>>,
        dark_mode: bool,
    ) -> Self {
        let MainWidgets {
            wind,
            menu,
            nav,
            stack,
            mut editor,
            preview,
            status_frame,
        } = widgets;

        let document = Document::new(sender);
        editor.set_buffer(document.buffer.clone());

        let (font, font_size) = {
            let s = settings.borrow();
            (font_of(s.font), s.font_size as i32)
        };
        editor.set_text_font(font);
        editor.set_text_size(font_size);

        let highlighter = MarkdownHighlighter::new(dark_mode, font, font_size);
        editor.set_highlight_data(document.style_buffer.clone(), highlighter.style_table());

        Self {
            workspace: None,
            document,
            preview: PreviewController::new(),
            highlighter,
            nav,
            editor,
            preview_view: preview,
            stack,
            window: wind,
            menu,
            status_frame,
            sender,
            settings,
            dark_mode,
            cut_source: None,
            // The placeholder entry build_menu adds under Open Recent
            recent_labels: vec!["(empty)".to_string()],
            rehighlight_pending: false,
        }
    }

    pub fn status(&mut self, message: &str) {
        self.status_frame.set_label(message);
    }

    pub fn update_window_title(&mut self) {
        let label = if self.document.display_name.is_empty() {
            "MarkWiki".to_string()
        } else {
            let marker = if self.document.is_dirty() { "*" } else { "" };
            format!("{}{} - MarkWiki", marker, self.document.display_name)
        };
        self.window.set_label(&label);
    }

    /// Ask the user what to do with unsaved changes.
    /// Returns `true` if it is safe to discard the editor contents.
    pub fn confirm_discard_changes(&mut self) -> bool {
        if !self.document.is_dirty() {
            return true;
        }
        let choice = dialog::choice2_default(
            "You have unsaved changes. Do you want to save them?",
            "Save",
            "Discard",
            "Cancel",
        );
        match choice {
            Some(0) => {
                self.save_file();
                !self.document.is_dirty()
            }
            Some(1) => {
                self.document.mark_clean();
                true
            }
            _ => false,
        }
    }

    // --- Wiki folder ---

    pub fn open_folder(&mut self) {
        if !self.confirm_discard_changes() {
            return;
        }
        match choose_wiki_folder(None) {
            Some(folder) => self.open_wiki(folder),
            None => self.status("No folder selected. Nothing has been done."),
        }
    }

    pub fn open_recent(&mut self, index: usize) {
        let folder = self.settings.borrow().recent_folders.get(index).cloned();
        if let Some(folder) = folder {
            if !self.confirm_discard_changes() {
                return;
            }
            self.open_wiki(folder);
        }
    }

    /// Bind the navigator to `folder` and remember it as most recent.
    pub fn open_wiki(&mut self, folder: String) {
        let workspace = match Workspace::open(&folder) {
            Ok(ws) => ws,
            Err(_) => {
                dialog::alert_default("Selected folder does not exist!");
                return;
            }
        };

        self.document.clear();
        self.preview_view.set_value(&preview::empty_preview_html());
        self.nav.rebuild(&workspace);
        self.workspace = Some(workspace);
        self.cut_source = None;

        {
            let mut s = self.settings.borrow_mut();
            s.add_recent_folder(&folder);
            if let Err(e) = s.save() {
                eprintln!("Failed to save settings: {}", e);
            }
        }
        self.rebuild_recent_menu();

        self.update_window_title();
        self.rehighlight_now();
        self.status(&format!("Wiki opened: {}", folder));
    }

    /// Rebuild the Open Recent submenu from the settings list.
    fn rebuild_recent_menu(&mut self) {
        for label in std::mem::take(&mut self.recent_labels) {
            let idx = self.menu.find_index(&format!("File/Open Recent/{}", label));
            if idx >= 0 {
                self.menu.remove(idx);
            }
        }

        let recents = self.settings.borrow().recent_folders.clone();
        for (i, folder) in recents.iter().enumerate() {
            let name = std::path::Path::new(folder)
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(folder);
            // '/' would nest a submenu, so it gets escaped
            let label = format!("{} {}", i + 1, name.replace('/', "\\/"));
            let s = self.sender;
            self.menu.add(
                &format!("File/Open Recent/{}", label),
                fltk::enums::Shortcut::None,
                MenuFlag::Normal,
                move |_| s.send(Message::OpenRecent(i)),
            );
            self.recent_labels.push(label);
        }
    }

    // --- Files ---

    /// A navigator item was selected. Folders only expand; files open.
    pub fn navigator_select(&mut self, tree_path: String) {
        let Some(path) = self.nav.absolute_path(&tree_path) else {
            return;
        };
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            self.status(&format!("Selected: {}", name));
            return;
        }
        self.open_file(path);
    }

    pub fn open_file(&mut self, path: PathBuf) {
        if !self.confirm_discard_changes() {
            return;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                self.document.load(path, &content);
                self.rehighlight_now();
                if self.preview.mode == ViewMode::Preview {
                    self.render_preview();
                }
                self.update_window_title();
                let name = self.document.display_name.clone();
                self.status(&format!("Opened file: {}", name));
            }
            Err(e) => dialog::alert_default(&format!("Failed to open file: {}", e)),
        }
    }

    pub fn save_file(&mut self) {
        if self.document.file_path.is_none() {
            self.status("No file to save");
            return;
        }
        match self.document.save() {
            Ok(()) => {
                self.update_window_title();
                if self.preview.mode == ViewMode::Preview {
                    self.render_preview();
                }
                let name = self.document.display_name.clone();
                self.status(&format!("Saved file: {}", name));
            }
            Err(e) => dialog::alert_default(&format!("Failed to save file: {}", e)),
        }
    }

    // --- Navigator operations ---

    fn target_directory(&self) -> Option<PathBuf> {
        let ws = self.workspace.as_ref()?;
        Some(ws.current_directory(self.nav.selected_path().as_deref()))
    }

    pub fn new_file(&mut self) {
        let Some(dir) = self.target_directory() else {
            self.status("No wiki folder open. Nothing has been done.");
            return;
        };
        let Some(name) = prompt_for_name("Enter file name:", "") else {
            return;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            self.status("No name given. Nothing has been done.");
            return;
        }

        let result = match self.workspace.as_ref() {
            Some(ws) => ws.create_file(&dir, &name),
            None => return,
        };
        match result {
            Ok(path) => {
                self.refresh_navigator();
                self.status(&format!("Created file: {}", path.display()));
            }
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                self.status("A file with that name already exists. Nothing has been done.");
            }
            Err(e) => self.status(&format!("Error creating file: {}", e)),
        }
    }

    pub fn new_folder(&mut self) {
        let Some(dir) = self.target_directory() else {
            self.status("No wiki folder open. Nothing has been done.");
            return;
        };
        let Some(name) = prompt_for_name("Enter folder name:", "") else {
            return;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            self.status("No name given. Nothing has been done.");
            return;
        }

        let result = match self.workspace.as_ref() {
            Some(ws) => ws.create_folder(&dir, &name),
            None => return,
        };
        match result {
            Ok(path) => {
                self.refresh_navigator();
                self.status(&format!("Created folder: {}", path.display()));
            }
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                self.status("A folder with that name already exists. Nothing has been done.");
            }
            Err(e) => self.status(&format!("Error creating folder: {}", e)),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(path) = self.nav.selected_path() else {
            return;
        };
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        let confirm = dialog::choice2_default(
            &format!("Are you sure you want to delete:\n{}?", name),
            "Yes",
            "No",
            "",
        );
        if confirm != Some(0) {
            return;
        }

        let result = match self.workspace.as_ref() {
            Some(ws) => ws.delete(&path),
            None => return,
        };
        match result {
            Ok(()) => {
                // If the open document just went away, empty the editor too
                let doc_gone = self
                    .document
                    .file_path
                    .as_ref()
                    .is_some_and(|p| p.starts_with(&path));
                if doc_gone {
                    self.document.clear();
                    self.preview_view.set_value(&preview::empty_preview_html());
                    self.update_window_title();
                }
                self.refresh_navigator();
                self.status(&format!("Deleted: {}", path.display()));
            }
            Err(e) => self.status(&format!("Error deleting: {}", e)),
        }
    }

    pub fn rename_selected(&mut self) {
        let Some(path) = self.nav.selected_path() else {
            return;
        };
        let current_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        let Some(new_name) = prompt_for_name("Enter new name:", &current_name) else {
            self.status("Nothing has been done.");
            return;
        };

        let result = match self.workspace.as_ref() {
            Some(ws) => ws.rename(&path, &new_name),
            None => return,
        };
        match result {
            Ok(RenameOutcome::Renamed) => {
                // Keep the open document bound to its new path
                if self.document.file_path.as_deref() == Some(path.as_path()) {
                    let parent = path.parent().map(|p| p.to_path_buf()).unwrap_or_default();
                    self.document.rebind(parent.join(new_name.trim()));
                    self.update_window_title();
                }
                self.refresh_navigator();
                self.status("Item renamed successfully.");
            }
            Ok(RenameOutcome::EmptyName) => {
                self.status("No new name has been given. Nothing has been done.");
            }
            Ok(RenameOutcome::Unchanged) => {
                self.status("New name and old name are the same. Nothing has been done.");
            }
            Ok(RenameOutcome::TargetExists) => {
                self.status("A file with this name already exists. Nothing has been done.");
            }
            Err(e) => dialog::alert_default(&format!("Error renaming: {}", e)),
        }
    }

    pub fn cut_selected(&mut self) {
        let Some(path) = self.nav.selected_path() else {
            return;
        };
        fltk::app::copy(&path.to_string_lossy());
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        self.cut_source = Some(path);
        self.status(&format!("Cut: {}", name));
    }

    pub fn paste_entry(&mut self) {
        let Some(src) = self.cut_source.clone() else {
            return;
        };
        let Some(dest_dir) = self.target_directory() else {
            return;
        };

        let result = match self.workspace.as_ref() {
            Some(ws) => ws.move_entry(&src, &dest_dir),
            None => return,
        };
        // On the no-op outcomes the cut stays armed so another
        // destination can still be picked
        match result {
            Ok(MoveOutcome::Moved) => {
                self.cut_source = None;
                self.refresh_navigator();
                self.status(&format!("Moved to: {}", dest_dir.display()));
            }
            Ok(MoveOutcome::SameTarget) => {
                self.status("Source and destination are the same");
            }
            Ok(MoveOutcome::TargetExists) => {
                self.status("An entry with that name already exists at the destination");
            }
            Err(_) => {
                self.cut_source = None;
                self.status("Failed to move entry");
            }
        }
    }

    fn refresh_navigator(&mut self) {
        if let Some(ws) = self.workspace.as_ref() {
            self.nav.rebuild(ws);
        }
    }

    pub fn focus_navigator(&mut self) {
        let _ = self.nav.widget.take_focus();
        self.status("Sidebar focused");
    }

    // --- View mode ---

    pub fn toggle_view_mode(&mut self) {
        match self.preview.toggle() {
            ViewMode::Preview => self.set_view_mode(),
            ViewMode::Edit => self.set_edit_mode(),
        }
    }

    /// Switch to the rendered preview, refreshed from the current buffer.
    fn set_view_mode(&mut self) {
        self.render_preview();
        let (x, y, w, h) = (self.stack.x(), self.stack.y(), self.stack.w(), self.stack.h());
        self.editor.hide();
        self.preview_view.resize(x, y, w, h);
        self.preview_view.show();
        self.status("View mode");
    }

    fn set_edit_mode(&mut self) {
        let (x, y, w, h) = (self.stack.x(), self.stack.y(), self.stack.w(), self.stack.h());
        self.preview_view.hide();
        self.editor.resize(x, y, w, h);
        self.editor.show();
        let _ = self.editor.take_focus();
        self.status("Edit mode");
    }

    fn render_preview(&mut self) {
        let text = buffer_text_no_leak(&self.document.buffer);
        if self.document.file_path.is_none() && text.is_empty() {
            self.preview_view.set_value(&preview::empty_preview_html());
            return;
        }
        let path = self
            .document
            .file_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        self.preview_view
            .set_value(&PreviewController::render_document(path.as_deref(), &text));
    }

    /// Ctrl+Enter: follow the `[label](target)` link on the cursor's line.
    pub fn navigate_link(&mut self) {
        let pos = self.editor.insert_position();
        let line = self.document.buffer.line_text(pos);
        let Some(target) = preview::link_target(&line) else {
            self.status("No link on the current line");
            return;
        };

        let resolved = match self.workspace.as_ref() {
            Some(ws) => ws.resolve_link(&target),
            None => {
                self.status("No wiki folder open.");
                return;
            }
        };
        match resolved {
            Some(path) => self.open_file(path),
            None => self.status(&format!("File {} does not exist in this wiki.", target)),
        }
    }

    // --- Highlighting ---

    pub fn buffer_modified(&mut self, _pos: i32) {
        self.update_window_title();
        if !self.rehighlight_pending {
            self.rehighlight_pending = true;
            let s = self.sender;
            fltk::app::add_timeout3(REHIGHLIGHT_DELAY, move |_| {
                s.send(Message::Rehighlight);
            });
        }
    }

    pub fn do_pending_rehighlight(&mut self) {
        self.rehighlight_pending = false;
        self.rehighlight_now();
    }

    fn rehighlight_now(&mut self) {
        let enabled = self.settings.borrow().highlighting_enabled;
        let syntax_name = if enabled {
            self.document
                .file_path
                .as_ref()
                .and_then(|p| self.highlighter.detect_syntax(&p.to_string_lossy()))
        } else {
            None
        };

        let text = buffer_text_no_leak(&self.document.buffer);
        let styles = match syntax_name {
            Some(name) => self.highlighter.highlight(&text, &name),
            None => syntax::default_style(&text),
        };
        self.document.style_buffer.set_text(&styles);
        self.editor
            .set_highlight_data(self.document.style_buffer.clone(), self.highlighter.style_table());
        self.editor.redraw();
    }

    // --- Theme & format ---

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        {
            let mut s = self.settings.borrow_mut();
            s.theme_mode = if self.dark_mode {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            };
            if let Err(e) = s.save() {
                eprintln!("Failed to save settings: {}", e);
            }
        }
        self.apply_theme_all();
    }

    pub fn apply_theme_all(&mut self) {
        let is_dark = self.dark_mode;
        {
            let mut widgets = ThemeWidgets {
                editor: &mut self.editor,
                preview: &mut self.preview_view,
                window: &mut self.window,
                menu: &mut self.menu,
                status_frame: &mut self.status_frame,
            };
            apply_theme(&mut widgets, is_dark);
        }
        self.nav.apply_theme(is_dark);
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.window, is_dark);

        self.highlighter.set_dark_mode(is_dark);
        self.rehighlight_now();
    }

    pub fn set_font(&mut self, font: Font) {
        let size = self.settings.borrow().font_size as i32;
        self.editor.set_text_font(font);
        self.highlighter.set_font(font, size);
        self.rehighlight_now();
        {
            let mut s = self.settings.borrow_mut();
            s.font = choice_of(font);
            let _ = s.save();
        }
        self.editor.redraw();
    }

    pub fn set_font_size(&mut self, size: i32) {
        let font = font_of(self.settings.borrow().font);
        self.editor.set_text_size(size);
        self.highlighter.set_font(font, size);
        self.rehighlight_now();
        {
            let mut s = self.settings.borrow_mut();
            s.font_size = size as u32;
            let _ = s.save();
        }
        self.editor.redraw();
    }

    // --- Lifecycle ---

    /// Reopen the most recently used wiki folder, like the original startup.
    pub fn open_last_wiki(&mut self) {
        let folder = self.settings.borrow().recent_folders.first().cloned();
        match folder {
            Some(folder) if std::path::Path::new(&folder).is_dir() => self.open_wiki(folder),
            _ => self.rebuild_recent_menu(),
        }
    }

    /// Handle quit request. Returns `true` if the app should exit.
    pub fn request_quit(&mut self) -> bool {
        self.confirm_discard_changes()
    }

    pub fn show_about(&self) {
        show_about_dialog();
    }
}

fn font_of(choice: FontChoice) -> Font {
    match choice {
        FontChoice::ScreenBold => Font::ScreenBold,
        FontChoice::Courier => Font::Courier,
        FontChoice::HelveticaMono => Font::Screen,
    }
}

fn choice_of(font: Font) -> FontChoice {
    if font == Font::ScreenBold {
        FontChoice::ScreenBold
    } else if font == Font::Courier {
        FontChoice::Courier
    } else {
        FontChoice::HelveticaMono
    }
}
