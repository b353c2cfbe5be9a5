//! notepad - 最小限のテキストエディタ
//!
//! 行番号ガター、ライト/ダークテーマ、New/Open/Save を備えたターミナル版メモ帳

// コアモジュール
pub mod app;
pub mod command;
pub mod document;
pub mod error;
pub mod frontend;
pub mod logging;
pub mod options;

// データ層
pub mod buffer;
pub mod file;

// 編集層
pub mod editor;
pub mod gutter;

// 表示層
pub mod dialog;
pub mod input;
pub mod ui;

// 公開API
pub use app::Notepad;
pub use command::{Command, DialogKind, DialogRequest, Effect, Outcome};
pub use document::{Document, DocumentState};
pub use error::{NotepadError, Result};
pub use frontend::{Session, TuiApplication};
pub use gutter::LineGutter;
pub use options::RunOptions;
