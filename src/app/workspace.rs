use std::fs;
use std::path::{Path, PathBuf};

use super::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One item in the navigator: a path, a name, and a type.
/// The filesystem owns the real state; this is a transient mirror.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// Outcome of a rename. Anything but `Renamed` leaves the filesystem untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    EmptyName,
    Unchanged,
    TargetExists,
}

/// Outcome of a cut/paste move. Anything but `Moved` leaves the filesystem untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    SameTarget,
    TargetExists,
}

/// The wiki folder currently open in the navigator.
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Bind to a wiki folder. The folder must already exist.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AppError::Workspace(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursive listing of the wiki folder in navigator order:
    /// folders before files, then case-insensitive by name, parents
    /// before their children.
    pub fn list(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        collect_entries(&self.root, &mut entries);
        entries
    }

    /// Create an empty file inside `dir`. Fails with `AlreadyExists` if a
    /// file with that name is already there.
    pub fn create_file(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        Ok(path)
    }

    pub fn create_folder(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let path = dir.join(name);
        fs::create_dir(&path)?;
        Ok(path)
    }

    /// Delete a file, or a folder with everything in it.
    pub fn delete(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Rename `path` to `new_name` within its parent directory.
    pub fn rename(&self, path: &Path, new_name: &str) -> Result<RenameOutcome> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(RenameOutcome::EmptyName);
        }

        let current_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if new_name == current_name {
            return Ok(RenameOutcome::Unchanged);
        }

        let parent = path.parent().unwrap_or(&self.root);
        let target = parent.join(new_name);
        if target.exists() {
            return Ok(RenameOutcome::TargetExists);
        }

        fs::rename(path, &target)?;
        Ok(RenameOutcome::Renamed)
    }

    /// Move `src` into `dest_dir`, keeping its name. Falls back to
    /// copy+delete for files when rename fails (different filesystems).
    pub fn move_entry(&self, src: &Path, dest_dir: &Path) -> Result<MoveOutcome> {
        let name = src
            .file_name()
            .ok_or_else(|| AppError::Workspace(format!("{} has no file name", src.display())))?;
        let dest = dest_dir.join(name);

        if dest == src {
            return Ok(MoveOutcome::SameTarget);
        }
        if dest.exists() {
            return Ok(MoveOutcome::TargetExists);
        }

        match fs::rename(src, &dest) {
            Ok(()) => Ok(MoveOutcome::Moved),
            Err(rename_err) => {
                if src.is_file() {
                    fs::copy(src, &dest)?;
                    fs::remove_file(src)?;
                    Ok(MoveOutcome::Moved)
                } else {
                    Err(rename_err.into())
                }
            }
        }
    }

    /// Resolve a link target (relative or absolute) against the wiki folder.
    /// Only files that exist and live inside the wiki folder resolve.
    pub fn resolve_link(&self, target: &str) -> Option<PathBuf> {
        let joined = self.root.join(target);
        let resolved = joined.canonicalize().ok()?;
        let root = self.root.canonicalize().ok()?;
        if resolved.is_file() && resolved.starts_with(&root) {
            Some(resolved)
        } else {
            None
        }
    }

    /// Directory new entries go into: the selection if it is a folder, the
    /// parent for a file selection, the wiki root when nothing is selected.
    pub fn current_directory(&self, selection: Option<&Path>) -> PathBuf {
        match selection {
            Some(p) if p.is_dir() => p.to_path_buf(),
            Some(p) => p.parent().unwrap_or(&self.root).to_path_buf(),
            None => self.root.clone(),
        }
    }
}

fn collect_entries(dir: &Path, out: &mut Vec<Entry>) {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(_) => return,
    };

    let mut children: Vec<Entry> = read
        .flatten()
        .filter_map(|e| {
            let path = e.path();
            let name = path.file_name()?.to_str()?.to_string();
            let kind = if path.is_dir() {
                EntryKind::Folder
            } else {
                EntryKind::File
            };
            Some(Entry { path, name, kind })
        })
        .collect();

    children.sort_by(|a, b| {
        let rank = |e: &Entry| if e.kind == EntryKind::Folder { 0 } else { 1 };
        rank(a)
            .cmp(&rank(b))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    for child in children {
        let is_folder = child.kind == EntryKind::Folder;
        let path = child.path.clone();
        out.push(child);
        if is_folder {
            collect_entries(&path, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn workspace_with(paths: &[&str]) -> (tempfile::TempDir, Workspace) {
        let dir = tempdir().unwrap();
        for p in paths {
            let full = dir.path().join(p);
            if p.ends_with('/') {
                fs::create_dir_all(&full).unwrap();
            } else {
                if let Some(parent) = full.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&full, "# page\n").unwrap();
            }
        }
        let ws = Workspace::open(dir.path()).unwrap();
        (dir, ws)
    }

    #[test]
    fn test_open_rejects_missing_folder() {
        assert!(Workspace::open("/nonexistent/wiki").is_err());
    }

    #[test]
    fn test_list_folders_first_then_names() {
        let (_dir, ws) = workspace_with(&["zebra.md", "Apple.md", "notes/", "notes/inner.md"]);
        let names: Vec<String> = ws.list().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["notes", "inner.md", "Apple.md", "zebra.md"]);
    }

    #[test]
    fn test_create_file_exclusive() {
        let (_dir, ws) = workspace_with(&["page.md"]);
        let root = ws.root().to_path_buf();

        let created = ws.create_file(&root, "new.md").unwrap();
        assert!(created.is_file());

        let err = ws.create_file(&root, "page.md").unwrap_err();
        match err {
            AppError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::AlreadyExists),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_delete_file_and_folder() {
        let (_dir, ws) = workspace_with(&["page.md", "notes/", "notes/inner.md"]);
        let root = ws.root().to_path_buf();

        ws.delete(&root.join("page.md")).unwrap();
        assert!(!root.join("page.md").exists());

        ws.delete(&root.join("notes")).unwrap();
        assert!(!root.join("notes").exists());
    }

    #[test]
    fn test_rename_outcomes() {
        let (_dir, ws) = workspace_with(&["page.md", "other.md"]);
        let page = ws.root().join("page.md");

        assert_eq!(ws.rename(&page, "  ").unwrap(), RenameOutcome::EmptyName);
        assert_eq!(ws.rename(&page, "page.md").unwrap(), RenameOutcome::Unchanged);
        assert_eq!(ws.rename(&page, "other.md").unwrap(), RenameOutcome::TargetExists);
        assert_eq!(ws.rename(&page, "renamed.md").unwrap(), RenameOutcome::Renamed);
        assert!(!page.exists());
        assert!(ws.root().join("renamed.md").is_file());
    }

    #[test]
    fn test_move_entry() {
        let (_dir, ws) = workspace_with(&["page.md", "notes/", "notes/taken.md"]);
        let root = ws.root().to_path_buf();
        let page = root.join("page.md");

        assert_eq!(ws.move_entry(&page, &root).unwrap(), MoveOutcome::SameTarget);

        fs::write(root.join("notes/page.md"), "occupied").unwrap();
        assert_eq!(
            ws.move_entry(&page, &root.join("notes")).unwrap(),
            MoveOutcome::TargetExists
        );

        let taken = root.join("notes/taken.md");
        assert_eq!(ws.move_entry(&taken, &root).unwrap(), MoveOutcome::Moved);
        assert!(root.join("taken.md").is_file());
        assert!(!taken.exists());
    }

    #[test]
    fn test_move_entry_noop_keeps_source_movable() {
        let (_dir, ws) = workspace_with(&["page.md", "notes/", "notes/page.md", "archive/"]);
        let root = ws.root().to_path_buf();
        let page = root.join("page.md");

        // Occupied destination is a no-op; a retry elsewhere still works
        assert_eq!(
            ws.move_entry(&page, &root.join("notes")).unwrap(),
            MoveOutcome::TargetExists
        );
        assert!(page.is_file());

        assert_eq!(
            ws.move_entry(&page, &root.join("archive")).unwrap(),
            MoveOutcome::Moved
        );
        assert!(root.join("archive/page.md").is_file());
        assert!(!page.exists());
    }

    #[test]
    fn test_resolve_link_inside_wiki() {
        let (_dir, ws) = workspace_with(&["page.md", "notes/inner.md"]);
        assert!(ws.resolve_link("page.md").is_some());
        assert!(ws.resolve_link("notes/inner.md").is_some());
        assert!(ws.resolve_link("missing.md").is_none());
        // Directories only expand in the tree, they never open
        assert!(ws.resolve_link("notes").is_none());
    }

    #[test]
    fn test_resolve_link_rejects_escape() {
        let outer = tempdir().unwrap();
        fs::write(outer.path().join("secret.md"), "outside").unwrap();
        let inner = outer.path().join("wiki");
        fs::create_dir(&inner).unwrap();
        let ws = Workspace::open(&inner).unwrap();

        assert!(ws.resolve_link("../secret.md").is_none());
    }

    #[test]
    fn test_current_directory() {
        let (_dir, ws) = workspace_with(&["page.md", "notes/"]);
        let root = ws.root().to_path_buf();

        assert_eq!(ws.current_directory(None), root);
        assert_eq!(ws.current_directory(Some(&root.join("notes"))), root.join("notes"));
        assert_eq!(ws.current_directory(Some(&root.join("page.md"))), root);
    }
}
