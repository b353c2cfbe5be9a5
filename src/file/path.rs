//! パス処理ユーティリティ

use crate::error::{FileError, Result};
use std::path::{Path, PathBuf};

/// 入力されたパス文字列を展開する
///
/// `~` と環境変数を展開し、相対パスは `base` からの相対として解決する。
pub fn expand_path(input: &str, base: &Path) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FileError::InvalidPath {
            path: input.to_string(),
        }
        .into());
    }

    let expanded = shellexpand::full(trimmed).map_err(|err| FileError::InvalidPath {
        path: format!("{} ({})", trimmed, err),
    })?;

    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(base.join(path))
    }
}

/// タイトル表示用のファイル名
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// 拡張子がなければ既定の拡張子を付ける
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_base() {
        let base = Path::new("/work");
        assert_eq!(expand_path("a.txt", base).unwrap(), PathBuf::from("/work/a.txt"));
        assert_eq!(expand_path("  /tmp/b.txt ", base).unwrap(), PathBuf::from("/tmp/b.txt"));
    }

    #[test]
    fn home_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path("~/notes.txt", Path::new("/work")).unwrap();
            assert_eq!(expanded, home.join("notes.txt"));
        }
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(expand_path("   ", Path::new("/")).is_err());
    }

    #[test]
    fn base_name_and_default_extension() {
        assert_eq!(base_name(Path::new("/tmp/dir/a.txt")), "a.txt");
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/notes"), "txt"),
            PathBuf::from("/tmp/notes.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/notes.md"), "txt"),
            PathBuf::from("/tmp/notes.md")
        );
    }
}
