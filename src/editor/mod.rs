//! 編集支援モジュール
//!
//! 編集履歴とクリップボード

pub mod clipboard;
pub mod history;

pub use clipboard::Clipboard;
pub use history::{
    CursorSnapshot, HistoryCommandKind, HistoryEntry, HistoryStack, DEFAULT_HISTORY_DEPTH,
};
