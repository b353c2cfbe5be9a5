//! クリップボード
//!
//! システムクリップボード（`arboard`）を優先し、利用できない環境では
//! プロセス内のレジスタにフォールバックする。

use crate::error::{NotepadError, Result};

/// Cut/Copy/Paste の受け渡し先
pub struct Clipboard {
    system: Option<arboard::Clipboard>,
    /// 最後にコピーした内容（フォールバック兼キャッシュ）
    register: Option<String>,
}

impl Clipboard {
    /// システムクリップボードへの接続を試みる
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                log::warn!("system clipboard unavailable, using internal register: {}", err);
                None
            }
        };
        Self {
            system,
            register: None,
        }
    }

    /// システムクリップボードに接続しない（テスト・ヘッドレス環境向け）
    pub fn detached() -> Self {
        Self {
            system: None,
            register: None,
        }
    }

    pub fn is_system_backed(&self) -> bool {
        self.system.is_some()
    }

    /// テキストを格納する
    ///
    /// レジスタへの格納は常に成功する。システム側の失敗はエラーとして返すが、
    /// 同一プロセス内の Paste には影響しない。
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.register = Some(text.to_string());
        if let Some(system) = self.system.as_mut() {
            system
                .set_text(text.to_string())
                .map_err(|err| NotepadError::Clipboard(err.to_string()))?;
        }
        Ok(())
    }

    /// テキストを取り出す
    pub fn get_text(&mut self) -> Option<String> {
        if let Some(system) = self.system.as_mut() {
            match system.get_text() {
                Ok(text) => return Some(text),
                Err(err) => log::debug!("system clipboard read failed: {}", err),
            }
        }
        self.register.clone()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("system", &self.system.is_some())
            .field("register", &self.register)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_clipboard_round_trips_through_register() {
        let mut clipboard = Clipboard::detached();
        assert!(!clipboard.is_system_backed());
        assert_eq!(clipboard.get_text(), None);

        clipboard.set_text("copied").unwrap();
        assert_eq!(clipboard.get_text().as_deref(), Some("copied"));

        clipboard.set_text("").unwrap();
        assert_eq!(clipboard.get_text().as_deref(), Some(""));
    }
}
