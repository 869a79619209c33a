//! MarkWiki - a desktop application for Markdown-based personal wikis.
//!
//! A wiki is just a folder of Markdown files on disk. The app is a file
//! navigator over that folder, a plain-text editor bound to the selected
//! file, and a toggleable rendered preview.

pub mod app;
pub mod ui;
