//! ファイル操作モジュール
//!
//! - 内容はそのまま読み書きする（改行の正規化は読み込み側で行う）
//! - 権限不足やデコード失敗はエラーとして呼び出し側へ返す
//! - バックアップ・自動保存はしない

pub mod filter;
pub mod io;
pub mod path;

pub use filter::{list_directory, DirEntry, FileFilter, ALL_FILES, DOCUMENT_FILTERS, TEXT_DOCUMENTS};
pub use io::{FileStore, FsFileStore};
pub use path::{base_name, expand_path, with_default_extension};
