//! ファイルI/O
//!
//! ドキュメント全体の読み込み・書き込み。ストアは内容を加工しない。
//! Open 時に CRLF / CR は LF へ正規化され（`normalize_line_endings`）、保存は
//! バッファの内容をそのまま書き、末尾に改行を足さない。

use crate::error::{FileError, Result};
use std::fs;
use std::path::Path;

/// ファイルシステムとの境界
pub trait FileStore {
    /// ファイル全体をテキストとして読み込む
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// テキストでファイルを上書きする
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// `std::fs` によるファイルストア
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileStore;

impl FileStore for FsFileStore {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        if path.is_dir() {
            return Err(FileError::InvalidPath {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|err| FileError::from_io(path, &err))?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::InvalidPath {
                path: path.display().to_string(),
            }
            .into());
        }

        fs::write(path, content.as_bytes()).map_err(|err| FileError::from_io(path, &err))?;
        log::debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotepadError;

    #[test]
    fn write_then_read_is_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        let store = FsFileStore;

        store.write(&path, "hello\nworld").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello\nworld");
        assert_eq!(store.read_to_string(&path).unwrap(), "hello\nworld");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsFileStore.read_to_string(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, NotepadError::File(FileError::NotFound { .. })));
    }

    #[test]
    fn binary_content_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = FsFileStore.read_to_string(&path).unwrap_err();
        assert!(matches!(err, NotepadError::File(FileError::Encoding { .. })));
    }

    #[test]
    fn directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsFileStore.write(dir.path(), "x").unwrap_err();
        assert!(matches!(err, NotepadError::File(FileError::InvalidPath { .. })));
    }
}
