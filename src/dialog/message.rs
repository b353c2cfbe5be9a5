//! メッセージボックス

use crate::error::{ErrorDisplay, ErrorLevel};
use crossterm::event::{KeyCode, KeyEvent};

/// OK ボタンだけのモーダルメッセージ
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBox {
    display: ErrorDisplay,
}

impl MessageBox {
    pub fn new(display: ErrorDisplay) -> Self {
        Self { display }
    }

    pub fn title(&self) -> &str {
        &self.display.title
    }

    pub fn message(&self) -> &str {
        &self.display.message
    }

    pub fn level(&self) -> ErrorLevel {
        self.display.level
    }

    /// 閉じるキーなら `true`
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
    }
}
