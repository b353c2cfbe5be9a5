//! ファイルダイアログのフィルタとディレクトリ一覧

use crate::error::{FileError, Result};
use std::path::{Path, PathBuf};

/// ファイル種別フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

/// すべてのファイル
pub const ALL_FILES: FileFilter = FileFilter {
    label: "All Files",
    pattern: "*.*",
};

/// テキスト文書
pub const TEXT_DOCUMENTS: FileFilter = FileFilter {
    label: "Text Documents",
    pattern: "*.txt",
};

/// Open/Save ダイアログ共通のフィルタ一覧（先頭が既定）
pub const DOCUMENT_FILTERS: [FileFilter; 2] = [ALL_FILES, TEXT_DOCUMENTS];

impl FileFilter {
    /// ファイル名がフィルタに一致するか
    ///
    /// `*.*` は拡張子の有無にかかわらずすべてに一致する。
    pub fn matches(&self, file_name: &str) -> bool {
        match self.pattern.strip_prefix("*.") {
            Some("*") | None => true,
            Some(ext) => Path::new(file_name)
                .extension()
                .map(|actual| actual.to_string_lossy().eq_ignore_ascii_case(ext))
                .unwrap_or(false),
        }
    }

    pub fn display(&self) -> String {
        format!("{} ({})", self.label, self.pattern)
    }
}

/// ディレクトリ一覧の1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    /// 一覧表示用の名前（ディレクトリは `/` 付き）
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// ディレクトリを走査してフィルタ済みの一覧を返す
///
/// 先頭に親ディレクトリ `..`、続いてディレクトリ、ファイルの順。隠しファイルは除外。
pub fn list_directory(dir: &Path, filter: &FileFilter) -> Result<Vec<DirEntry>> {
    let io_error = |err: std::io::Error| FileError::from_io(dir, &err);
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        // シンボリックリンクはリンク先で判定
        let is_dir = path.is_dir();
        if is_dir {
            dirs.push(DirEntry { name, path, is_dir });
        } else if filter.matches(&name) {
            files.push(DirEntry { name, path, is_dir });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(DirEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matching() {
        assert!(ALL_FILES.matches("notes.txt"));
        assert!(ALL_FILES.matches("Makefile"));
        assert!(TEXT_DOCUMENTS.matches("notes.txt"));
        assert!(TEXT_DOCUMENTS.matches("NOTES.TXT"));
        assert!(!TEXT_DOCUMENTS.matches("notes.md"));
        assert!(!TEXT_DOCUMENTS.matches("txt"));
        assert_eq!(TEXT_DOCUMENTS.display(), "Text Documents (*.txt)");
    }

    #[test]
    fn listing_orders_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.txt"), "").unwrap();

        let all: Vec<String> = list_directory(dir.path(), &ALL_FILES)
            .unwrap()
            .iter()
            .map(DirEntry::display_name)
            .collect();
        assert_eq!(all, vec!["../", "sub/", "a.md", "b.txt"]);

        let text: Vec<String> = list_directory(dir.path(), &TEXT_DOCUMENTS)
            .unwrap()
            .iter()
            .map(DirEntry::display_name)
            .collect();
        assert_eq!(text, vec!["../", "sub/", "b.txt"]);
    }
}
