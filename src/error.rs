//! エラーハンドリング
//!
//! notepad 全体で使用するエラー型と、ユーザー向けメッセージへの変換を定義
//! ファイルI/Oの失敗はモーダルメッセージで通知し、ドキュメント状態は変更しない

use std::io;
use std::path::Path;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotepadError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 編集操作エラー
    #[error("Edit failed: {0}")]
    Edit(#[from] EditError),

    /// クリップボードエラー
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error in {path}: {message}")]
    Encoding { path: String, message: String },

    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },
}

impl FileError {
    /// `std::io::Error` を対象パス付きで分類する
    pub fn from_io(path: &Path, error: &io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            io::ErrorKind::InvalidData => FileError::Encoding {
                path,
                message: error.to_string(),
            },
            _ => FileError::Io {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    #[error("Terminal initialization failed: {message}")]
    TerminalInit { message: String },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 編集操作エラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Position {0} is out of bounds")]
    OutOfBounds(usize),

    #[error("Invalid character: {0:?}")]
    InvalidChar(char),

    #[error("Cursor at buffer start")]
    AtBufferStart,

    #[error("Cursor at buffer end")]
    AtBufferEnd,
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, NotepadError>;

/// エラーレベル分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

/// エラー表示情報（モーダルメッセージ用）
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDisplay {
    /// 見出し
    pub title: String,
    /// 本文
    pub message: String,
    /// エラーレベル
    pub level: ErrorLevel,
}

impl ErrorDisplay {
    pub fn new(error: &NotepadError) -> Self {
        let (message, level) = Self::format_error(error);
        Self {
            title: "Notepad".to_string(),
            message,
            level,
        }
    }

    fn format_error(error: &NotepadError) -> (String, ErrorLevel) {
        match error {
            NotepadError::File(FileError::NotFound { path }) => {
                (format!("File not found: {}", path), ErrorLevel::Error)
            }
            NotepadError::File(FileError::PermissionDenied { path }) => {
                (format!("Access denied: {}", path), ErrorLevel::Error)
            }
            NotepadError::File(FileError::InvalidPath { path }) => {
                (format!("Not a regular file: {}", path), ErrorLevel::Error)
            }
            NotepadError::File(FileError::Encoding { path, .. }) => (
                format!("{} does not contain valid UTF-8 text", path),
                ErrorLevel::Error,
            ),
            NotepadError::File(FileError::Io { path, message }) => {
                (format!("{}: {}", path, message), ErrorLevel::Error)
            }
            NotepadError::Clipboard(message) => {
                (format!("Clipboard unavailable: {}", message), ErrorLevel::Warning)
            }
            _ => (error.to_string(), ErrorLevel::Error),
        }
    }
}

/// パニック時に端末を復元してから終了する
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // raw モードと代替画面を解除しないとシェルが壊れたままになる
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        log::error!("panic at {}: {}", location, message);
        eprintln!("PANIC at {}: {}", location, message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}
