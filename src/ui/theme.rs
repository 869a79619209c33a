use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::TextEditor,
    window::Window,
};

pub struct ThemeWidgets<'a> {
    pub editor: &'a mut TextEditor,
    pub preview: &'a mut HelpView,
    pub window: &'a mut Window,
    pub menu: &'a mut MenuBar,
    pub status_frame: &'a mut Frame,
}

pub fn apply_theme(w: &mut ThemeWidgets, is_dark: bool) {
    if is_dark {
        w.editor.set_color(Color::from_rgb(30, 30, 30));
        w.editor.set_text_color(Color::from_rgb(220, 220, 220));
        w.editor.set_cursor_color(Color::from_rgb(255, 255, 255));
        w.editor.set_selection_color(Color::from_rgb(70, 70, 100));
        w.preview.set_color(Color::from_rgb(30, 30, 30));
        w.preview.set_text_color(Color::from_rgb(220, 220, 220));
        w.window.set_color(Color::from_rgb(25, 25, 25));
        w.window.set_label_color(Color::from_rgb(220, 220, 220));
        w.menu.set_color(Color::from_rgb(35, 35, 35));
        w.menu.set_text_color(Color::from_rgb(220, 220, 220));
        w.menu.set_selection_color(Color::from_rgb(60, 60, 60)); // Hover color
        w.status_frame.set_color(Color::from_rgb(35, 35, 35));
        w.status_frame.set_label_color(Color::from_rgb(200, 200, 200));
    } else {
        w.editor.set_color(Color::White);
        w.editor.set_text_color(Color::Black);
        w.editor.set_cursor_color(Color::Black);
        w.editor.set_selection_color(Color::from_rgb(173, 216, 230));
        w.preview.set_color(Color::from_rgb(245, 245, 245));
        w.preview.set_text_color(Color::from_rgb(51, 51, 51));
        w.window.set_color(Color::from_rgb(240, 240, 240));
        w.window.set_label_color(Color::Black);
        w.menu.set_color(Color::from_rgb(240, 240, 240));
        w.menu.set_text_color(Color::Black);
        w.menu.set_selection_color(Color::from_rgb(200, 200, 200)); // Hover color
        w.status_frame.set_color(Color::from_rgb(240, 240, 240));
        w.status_frame.set_label_color(Color::from_rgb(60, 60, 60));
    }

    w.editor.redraw();
    w.preview.redraw();
    w.menu.redraw();
    w.status_frame.redraw();
    w.window.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);

        let on: i32 = if is_dark { 1 } else { 0 };

        // Attribute 20 (Windows 11 / Windows 10 2004+)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(20), // DWMWA_USE_IMMERSIVE_DARK_MODE
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );

        // Attribute 19 (Windows 10 1809-1903)
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWINDOWATTRIBUTE(19),
            from_ref(&on).cast(),
            size_of::<i32>() as u32,
        );
    }
}
