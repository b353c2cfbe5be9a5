//! ドキュメント状態
//!
//! 編集中のファイルが何か（未保存か、パスに結び付いているか）と
//! ウィンドウタイトルを管理する

use crate::file::base_name;
use std::path::{Path, PathBuf};

/// アプリケーション名（タイトル末尾）
pub const APP_NAME: &str = "Notepad";
/// 無題ドキュメントの表示名
pub const UNTITLED: &str = "Untitled";
/// 保存ダイアログの既定ファイル名
pub const DEFAULT_SAVE_NAME: &str = "Untitled.txt";
/// 保存時の既定拡張子
pub const DEFAULT_EXTENSION: &str = "txt";

/// ファイルとの結び付き
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState<'a> {
    /// パスなし（無題）
    Unbound,
    /// パスあり
    Bound(&'a Path),
}

/// 編集中ドキュメント
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    modified: bool,
}

impl Document {
    /// 無題の空ドキュメント
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DocumentState<'_> {
        match &self.path {
            Some(path) => DocumentState::Bound(path),
            None => DocumentState::Unbound,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// 無題に戻す（New）
    pub fn reset(&mut self) {
        self.path = None;
        self.modified = false;
    }

    /// パスに結び付け、未変更状態にする（Open 成功 / Save 成功）
    pub fn bind(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.modified = false;
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    /// 表示名（無題またはファイル名）
    pub fn display_name(&self) -> String {
        match &self.path {
            Some(path) => base_name(path),
            None => UNTITLED.to_string(),
        }
    }

    /// ウィンドウタイトル
    pub fn title(&self) -> String {
        format!("{} - {}", self.display_name(), APP_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_is_unbound() {
        let doc = Document::new();
        assert_eq!(doc.state(), DocumentState::Unbound);
        assert_eq!(doc.title(), "Untitled - Notepad");
        assert!(!doc.is_modified());
    }

    #[test]
    fn bind_and_reset_transitions() {
        let mut doc = Document::new();
        doc.mark_modified();
        doc.bind(PathBuf::from("/tmp/dir/a.txt"));
        assert_eq!(doc.state(), DocumentState::Bound(Path::new("/tmp/dir/a.txt")));
        assert_eq!(doc.title(), "a.txt - Notepad");
        assert!(!doc.is_modified());

        doc.reset();
        assert_eq!(doc.state(), DocumentState::Unbound);
        assert_eq!(doc.path(), None);
    }
}
