use fltk::enums::Font;

/// All messages that can be sent through the FLTK channel.
/// Menu and widget callbacks send one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    // Wiki folder
    OpenFolder,
    OpenRecent(usize),

    // Navigator
    NavigatorSelect(String),
    NewFile,
    NewFolder,
    DeleteSelected,
    RenameSelected,
    CutSelected,
    PasteEntry,
    FocusNavigator,

    // File
    FileSave,
    FileQuit,
    WindowClose,

    // View
    TogglePreview,
    ToggleDarkMode,

    // Format
    SetFont(Font),
    SetFontSize(i32),

    // Editing
    BufferModified(i32),
    Rehighlight,
    NavigateLink,

    // Help
    ShowAbout,
}
