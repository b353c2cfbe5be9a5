//! バッファ管理モジュール
//!
//! テキストデータ、カーソル位置、選択範囲、編集操作を提供

pub mod cursor;
pub mod editor;
pub mod gap_buffer;
pub mod operations;

// 公開API
pub use cursor::CursorPosition;
pub use editor::{normalize_line_endings, EditOperations, TextEditor};
pub use gap_buffer::GapBuffer;
pub use operations::{AtomicEdit, Movement};
