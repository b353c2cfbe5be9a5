//! モーダルダイアログ
//!
//! ファイル選択とメッセージ表示。どちらも開いている間はキー入力を独占する。

pub mod file_dialog;
pub mod message;

pub use file_dialog::{DialogResult, FileDialog};
pub use message::MessageBox;

/// 現在表示中のモーダル
#[derive(Debug, Clone)]
pub enum Overlay {
    File(FileDialog),
    Message(MessageBox),
}
