//! 入力処理モジュール
//!
//! キーイベントからコマンドへの対応付け

pub mod keybinding;

// 公開API
pub use keybinding::{Key, KeyAction, KeyCode, KeyMap, KeyModifiers, DEFAULT_PAGE_LINES};
