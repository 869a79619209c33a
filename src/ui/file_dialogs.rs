use fltk::dialog;

/// Native directory chooser for picking a wiki folder.
/// Starts from the user's home directory unless a better hint is known.
pub fn choose_wiki_folder(start_dir: Option<&str>) -> Option<String> {
    let home;
    let start = match start_dir {
        Some(dir) => dir,
        None => {
            home = dirs::home_dir()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| ".".to_string());
            &home
        }
    };
    let folder = dialog::dir_chooser("Select Wiki Folder", start, false)?;
    if folder.is_empty() { None } else { Some(folder) }
}

/// Prompt for a file or folder name. Returns None on cancel.
pub fn prompt_for_name(title: &str, default: &str) -> Option<String> {
    dialog::input_default(title, default)
}
