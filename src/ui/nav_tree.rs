use std::path::PathBuf;

use fltk::{
    app::Sender,
    enums::Color,
    prelude::*,
    tree::{Tree, TreeReason, TreeSelect},
};

use crate::app::messages::Message;
use crate::app::workspace::{EntryKind, Workspace};

/// Sidebar tree over the wiki folder. Items are addressed by their
/// root-relative tree pathname; the filesystem path is recovered by
/// joining that pathname onto the wiki root.
pub struct NavTree {
    pub widget: Tree,
    root: Option<PathBuf>,
    item_color: Color,
}

impl NavTree {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut tree = Tree::new(0, 0, 0, 0, None);
        tree.set_show_root(false);
        tree.set_select_mode(TreeSelect::Single);

        let s = *sender;
        tree.set_callback(move |t| {
            if t.callback_reason() == TreeReason::Selected {
                if let Some(item) = t.callback_item() {
                    if let Ok(path) = t.item_pathname(&item) {
                        s.send(Message::NavigatorSelect(path));
                    }
                }
            }
        });

        Self {
            widget: tree,
            root: None,
            item_color: Color::Black,
        }
    }

    /// Rebuild the tree from the workspace listing. Folders come in
    /// collapsed; selection is dropped.
    pub fn rebuild(&mut self, workspace: &Workspace) {
        self.widget.clear();
        self.root = Some(workspace.root().to_path_buf());

        for entry in workspace.list() {
            let Ok(rel) = entry.path.strip_prefix(workspace.root()) else {
                continue;
            };
            let label = rel.to_string_lossy().replace('\\', "/");
            if let Some(mut item) = self.widget.add(&label) {
                item.set_label_fgcolor(self.item_color);
                if entry.kind == EntryKind::Folder {
                    item.close();
                }
            }
        }

        self.widget.redraw();
    }

    /// Filesystem path for a tree pathname from a selection callback.
    pub fn absolute_path(&self, tree_path: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(tree_path))
    }

    /// Filesystem path of the selected item, or None.
    pub fn selected_path(&self) -> Option<PathBuf> {
        let item = self.widget.first_selected_item()?;
        let tree_path = self.widget.item_pathname(&item).ok()?;
        self.absolute_path(&tree_path)
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        if is_dark {
            self.widget.set_color(Color::from_rgb(30, 30, 30));
            self.widget.set_selection_color(Color::from_rgb(70, 70, 100));
            self.item_color = Color::from_rgb(220, 220, 220);
        } else {
            self.widget.set_color(Color::White);
            self.widget.set_selection_color(Color::from_rgb(173, 216, 230));
            self.item_color = Color::Black;
        }

        // Recolor items already in the tree
        let mut item = self.widget.first();
        while let Some(mut it) = item {
            it.set_label_fgcolor(self.item_color);
            item = self.widget.next(&it);
        }

        self.widget.redraw();
    }
}
