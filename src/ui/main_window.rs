use fltk::{
    app::Sender,
    enums::{Color, Event, FrameType, Key},
    frame::Frame,
    group::{Flex, Group},
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextEditor, WrapMode},
    window::Window,
};

use crate::app::messages::Message;
use super::nav_tree::NavTree;

pub const SIDEBAR_WIDTH: i32 = 240;
pub const MENU_HEIGHT: i32 = 30;
pub const STATUS_HEIGHT: i32 = 24;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub nav: NavTree,
    /// Group holding the stacked editor and preview widgets.
    pub stack: Group,
    pub editor: TextEditor,
    pub preview: HelpView,
    pub status_frame: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1200, 800, "MarkWiki");
    wind.set_xclass("MarkWiki");

    let mut col = Flex::new(0, 0, 1200, 800, None);
    col.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    col.fixed(&menu, MENU_HEIGHT);

    let mut row = Flex::new(0, 0, 0, 0, None);
    row.set_type(fltk::group::FlexType::Row);

    let nav = NavTree::new(sender);
    row.fixed(&nav.widget, SIDEBAR_WIDTH);

    // Editor and preview share the same area; exactly one is visible.
    let mut stack = Group::new(0, 0, 0, 0, None);

    let mut editor = TextEditor::new(0, 0, 0, 0, "");
    editor.set_buffer(TextBuffer::default());
    editor.wrap_mode(WrapMode::AtBounds, 0);
    editor.set_linenumber_width(0);

    let mut preview = HelpView::new(0, 0, 0, 0, "");
    preview.hide();

    stack.end();
    stack.resizable(&stack);

    row.end();

    let mut status_frame = Frame::default();
    status_frame.set_frame(FrameType::FlatBox);
    status_frame.set_label("Ready");
    status_frame.set_label_size(12);
    status_frame.set_align(fltk::enums::Align::Left | fltk::enums::Align::Inside);
    col.fixed(&status_frame, STATUS_HEIGHT);

    col.end();
    wind.resizable(&col);

    // Escape focuses the sidebar instead of closing the window
    let s = *sender;
    wind.handle(move |_, ev| {
        if ev == Event::Shortcut && fltk::app::event_key() == Key::Escape {
            s.send(Message::FocusNavigator);
            return true;
        }
        false
    });

    // Ctrl+Enter in the editor follows the link on the current line
    let s = *sender;
    editor.handle(move |_, ev| {
        if ev == Event::KeyDown
            && fltk::app::event_key() == Key::Enter
            && fltk::app::event_state().contains(fltk::enums::EventState::Ctrl)
        {
            s.send(Message::NavigateLink);
            return true;
        }
        false
    });

    // Placeholder palette until apply_theme runs
    status_frame.set_color(Color::from_rgb(240, 240, 240));

    MainWidgets {
        wind,
        menu,
        nav,
        stack,
        editor,
        preview,
        status_frame,
    }
}
