use fltk::{
    app::Sender,
    enums::{Font, Key, Shortcut},
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::messages::Message;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, initial_dark_mode: bool) {
    let s = sender;

    // File
    menu.add("File/Open Folder...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenFolder) });
    // "Open Recent" entries are rebuilt from settings after every folder open
    menu.add("File/Open Recent/(empty)", Shortcut::None, MenuFlag::Normal, |_| {});
    menu.add("File/New File...", Shortcut::Ctrl | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::NewFile) });
    menu.add("File/New Folder...", Shortcut::Ctrl | Shortcut::Shift | 'n', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::NewFolder) });
    menu.add("File/Save", Shortcut::Ctrl | 's', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileSave) });
    // No global shortcuts for the navigator clipboard: Ctrl+X/Ctrl+V belong to the editor
    menu.add("File/Rename...", Shortcut::from_key(Key::F2), MenuFlag::Normal, { let s = *s; move |_| s.send(Message::RenameSelected) });
    menu.add("File/Delete", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::DeleteSelected) });
    menu.add("File/Cut Entry", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CutSelected) });
    menu.add("File/Paste Entry", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::PasteEntry) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // View
    menu.add("View/Toggle Preview", Shortcut::Ctrl | '`', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::TogglePreview) });
    let dm_flag = if initial_dark_mode { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Dark Mode", Shortcut::None, dm_flag, { let s = *s; move |_| s.send(Message::ToggleDarkMode) });

    // Format
    menu.add("Format/Font/Screen (Bold)", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetFont(Font::ScreenBold)) });
    menu.add("Format/Font/Courier", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetFont(Font::Courier)) });
    menu.add("Format/Font/Helvetica Mono", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetFont(Font::Screen)) });
    menu.add("Format/Font Size/Small (12)", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetFontSize(12)) });
    menu.add("Format/Font Size/Medium (16)", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetFontSize(16)) });
    menu.add("Format/Font Size/Large (20)", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetFontSize(20)) });

    // Help
    menu.add("Help/About MarkWiki", Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::ShowAbout) });
}
