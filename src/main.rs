#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::cell::RefCell;
use std::rc::Rc;

use fltk::{app, prelude::*};

use mark_wiki::app::messages::Message;
use mark_wiki::app::platform::detect_system_dark_mode;
use mark_wiki::app::settings::{AppSettings, ThemeMode};
use mark_wiki::app::state::AppState;
use mark_wiki::ui::main_window::build_main_window;
use mark_wiki::ui::menu::build_menu;

fn main() {
    let a = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let settings = Rc::new(RefCell::new(AppSettings::load()));
    let dark_mode = match settings.borrow().theme_mode {
        ThemeMode::Light => false,
        ThemeMode::Dark => true,
        ThemeMode::SystemDefault => detect_system_dark_mode(),
    };

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender, dark_mode);

    let mut state = AppState::new(widgets, sender, settings, dark_mode);
    state.apply_theme_all();

    // Route the window close button through the same confirmation as Quit
    let s = sender;
    state.window.set_callback(move |_| {
        s.send(Message::WindowClose);
    });
    state.window.show();
    #[cfg(target_os = "windows")]
    {
        use mark_wiki::ui::theme::set_windows_titlebar_theme;
        set_windows_titlebar_theme(&state.window, dark_mode);
    }

    state.open_last_wiki();

    while a.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::OpenFolder => state.open_folder(),
                Message::OpenRecent(index) => state.open_recent(index),

                Message::NavigatorSelect(tree_path) => state.navigator_select(tree_path),
                Message::NewFile => state.new_file(),
                Message::NewFolder => state.new_folder(),
                Message::DeleteSelected => state.delete_selected(),
                Message::RenameSelected => state.rename_selected(),
                Message::CutSelected => state.cut_selected(),
                Message::PasteEntry => state.paste_entry(),
                Message::FocusNavigator => state.focus_navigator(),

                Message::FileSave => state.save_file(),
                Message::FileQuit | Message::WindowClose => {
                    if state.request_quit() {
                        a.quit();
                    }
                }

                Message::TogglePreview => state.toggle_view_mode(),
                Message::ToggleDarkMode => state.toggle_dark_mode(),

                Message::SetFont(font) => state.set_font(font),
                Message::SetFontSize(size) => state.set_font_size(size),

                Message::BufferModified(pos) => state.buffer_modified(pos),
                Message::Rehighlight => state.do_pending_rehighlight(),
                Message::NavigateLink => state.navigate_link(),

                Message::ShowAbout => state.show_about(),
            }
        }
    }
}
