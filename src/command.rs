//! コマンドシステム
//!
//! メニュー・キー入力・ダイアログ結果をすべて閉じたコマンド集合で表し、
//! 実行結果としてホスト（UI側）が行うべき副作用を返す

use crate::buffer::Movement;
use crate::document::{DEFAULT_EXTENSION, DEFAULT_SAVE_NAME};
use crate::error::ErrorDisplay;
use crate::file::{FileFilter, DOCUMENT_FILTERS};
use std::path::PathBuf;

/// コマンドの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // ファイル操作
    New,
    Open,
    Save,
    Exit,

    // 編集操作
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    SelectAll,

    // 表示
    ToggleDarkMode,
    ToggleWordWrap,

    // ヘルプ
    About,

    // テキスト面への入力
    InsertChar(char),
    /// まとまったテキストを1回の編集として挿入（端末からの貼り付け）
    InsertText(String),
    InsertNewline,
    DeleteBackward,
    DeleteForward,
    Move { movement: Movement, extend: bool },
    /// バッファ内容が変わった可能性がある（ガター再同期）
    BufferChanged,

    // ダイアログの結果（`None` はキャンセル）
    OpenDialogClosed(Option<PathBuf>),
    SaveDialogClosed(Option<PathBuf>),
}

impl Command {
    /// メニュー等で使う説明
    pub fn description(&self) -> &'static str {
        match self {
            Command::New => "新規ドキュメント",
            Command::Open => "ファイルを開く",
            Command::Save => "ファイルを保存",
            Command::Exit => "終了",
            Command::Cut => "切り取り",
            Command::Copy => "コピー",
            Command::Paste => "貼り付け",
            Command::Undo => "元に戻す",
            Command::Redo => "やり直し",
            Command::SelectAll => "すべて選択",
            Command::ToggleDarkMode => "ダークモード切り替え",
            Command::ToggleWordWrap => "折り返し切り替え",
            Command::About => "バージョン情報",
            Command::InsertChar(_) => "文字を挿入",
            Command::InsertText(_) => "テキストを挿入",
            Command::InsertNewline => "改行を挿入",
            Command::DeleteBackward => "前の文字を削除",
            Command::DeleteForward => "カーソル位置の文字を削除",
            Command::Move { .. } => "カーソル移動",
            Command::BufferChanged => "行番号を再同期",
            Command::OpenDialogClosed(_) => "ファイルを開くダイアログの結果",
            Command::SaveDialogClosed(_) => "保存ダイアログの結果",
        }
    }

    /// テキスト面へのキー入力由来のコマンドか
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::InsertNewline
                | Command::DeleteBackward
                | Command::DeleteForward
                | Command::Move { .. }
        )
    }
}

/// ダイアログの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Open,
    Save,
}

/// ファイルダイアログの表示要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    /// 入力欄の初期値
    pub suggested_name: Option<String>,
    pub filters: &'static [FileFilter],
    /// 拡張子が省略された時に付ける拡張子
    pub default_extension: &'static str,
}

impl DialogRequest {
    /// Open ダイアログ
    pub fn open() -> Self {
        Self {
            kind: DialogKind::Open,
            suggested_name: None,
            filters: &DOCUMENT_FILTERS,
            default_extension: DEFAULT_EXTENSION,
        }
    }

    /// Save ダイアログ
    pub fn save() -> Self {
        Self {
            kind: DialogKind::Save,
            suggested_name: Some(DEFAULT_SAVE_NAME.to_string()),
            filters: &DOCUMENT_FILTERS,
            default_extension: DEFAULT_EXTENSION,
        }
    }
}

/// ホストが行う副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// ファイル選択ダイアログを表示し、結果を `*DialogClosed` で返す
    ShowDialog(DialogRequest),
    /// モーダルメッセージを表示
    ShowMessage(ErrorDisplay),
    /// ウィンドウタイトルを更新
    SetTitle(String),
    /// アプリケーションを終了
    Quit,
}

/// コマンド実行の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub effects: Vec<Effect>,
    /// バッファ内容が変化したか
    pub buffer_changed: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            buffer_changed: false,
        }
    }

    pub fn changed() -> Self {
        Self {
            effects: Vec::new(),
            buffer_changed: true,
        }
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn should_quit(&self) -> bool {
        self.effects.iter().any(|effect| matches!(effect, Effect::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_suggests_untitled_txt() {
        let request = DialogRequest::save();
        assert_eq!(request.kind, DialogKind::Save);
        assert_eq!(request.suggested_name.as_deref(), Some("Untitled.txt"));
        assert_eq!(request.filters.len(), 2);
        assert_eq!(request.filters[0].pattern, "*.*");
        assert_eq!(request.filters[1].pattern, "*.txt");
    }

    #[test]
    fn text_input_classification() {
        assert!(Command::InsertChar('a').is_text_input());
        assert!(Command::Move { movement: Movement::Up, extend: false }.is_text_input());
        assert!(!Command::Save.is_text_input());
        assert!(!Command::BufferChanged.is_text_input());
        assert!(!Command::InsertText("x".to_string()).is_text_input());
    }

    #[test]
    fn quit_detection() {
        assert!(Outcome::with_effect(Effect::Quit).should_quit());
        assert!(!Outcome::changed().should_quit());
    }
}
