//! ファイル選択ダイアログ
//!
//! 現在のディレクトリの一覧とファイル名入力欄を持つ。Tab でフィルタを切り替え、
//! 上下キーで一覧を選び、Enter でディレクトリへ移動またはパスを確定する。
//! 既存ファイルへの保存は y/n で上書きを確認する。

use crate::command::{DialogKind, DialogRequest};
use crate::file::{expand_path, list_directory, with_default_extension, DirEntry, FileFilter};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

/// ダイアログの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// 入力継続中
    Pending,
    /// パスが確定した
    Confirmed(PathBuf),
    /// キャンセルされた
    Cancelled,
}

/// ファイル選択ダイアログの状態
#[derive(Debug, Clone)]
pub struct FileDialog {
    request: DialogRequest,
    directory: PathBuf,
    /// ファイル名入力欄
    input: String,
    /// 入力欄のカーソル（文字単位）
    input_cursor: usize,
    filter_index: usize,
    entries: Vec<DirEntry>,
    selected: Option<usize>,
    /// 直前の操作が一覧の選択か
    list_focus: bool,
    /// 一覧の表示開始位置
    scroll: usize,
    error: Option<String>,
    /// 上書き確認中の保存先
    pending_replace: Option<PathBuf>,
}

impl FileDialog {
    /// `directory` を起点にダイアログを開く
    pub fn new(request: DialogRequest, directory: PathBuf) -> Self {
        let input = request.suggested_name.clone().unwrap_or_default();
        let input_cursor = input.chars().count();
        let mut dialog = Self {
            request,
            directory,
            input,
            input_cursor,
            filter_index: 0,
            entries: Vec::new(),
            selected: None,
            list_focus: false,
            scroll: 0,
            error: None,
            pending_replace: None,
        };
        dialog.refresh();
        dialog
    }

    pub fn kind(&self) -> DialogKind {
        self.request.kind
    }

    /// 見出し
    pub fn title(&self) -> &'static str {
        match self.request.kind {
            DialogKind::Open => "Open",
            DialogKind::Save => "Save As",
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    pub fn filter(&self) -> &FileFilter {
        &self.request.filters[self.filter_index]
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 上書き確認の文言
    pub fn replace_prompt(&self) -> Option<String> {
        self.pending_replace.as_ref().map(|path| {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            format!("{} already exists. Replace? (y/n)", name)
        })
    }

    /// 高さ `rows` の一覧で選択項目が見えるように表示開始位置を返す
    pub fn visible_range(&mut self, rows: usize) -> std::ops::Range<usize> {
        let rows = rows.max(1);
        if let Some(selected) = self.selected {
            if selected < self.scroll {
                self.scroll = selected;
            } else if selected >= self.scroll + rows {
                self.scroll = selected + 1 - rows;
            }
        }
        let end = (self.scroll + rows).min(self.entries.len());
        self.scroll.min(end)..end
    }

    /// 一覧を読み直す
    pub fn refresh(&mut self) {
        let filter = *self.filter();
        match list_directory(&self.directory, &filter) {
            Ok(entries) => {
                self.entries = entries;
            }
            Err(err) => {
                log::warn!("cannot list {}: {}", self.directory.display(), err);
                self.entries.clear();
                self.error = Some(err.to_string());
            }
        }
        self.selected = None;
        self.list_focus = false;
        self.scroll = 0;
    }

    /// キー入力を処理する
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('g') => DialogResult::Cancelled,
                _ => DialogResult::Pending,
            };
        }

        if let Some(path) = self.pending_replace.take() {
            return self.answer_replace(key, path);
        }

        match key.code {
            KeyCode::Esc => DialogResult::Cancelled,
            KeyCode::Enter => self.confirm(),
            KeyCode::Tab => {
                self.cycle_filter(1);
                DialogResult::Pending
            }
            KeyCode::BackTab => {
                self.cycle_filter(self.request.filters.len().saturating_sub(1));
                DialogResult::Pending
            }
            KeyCode::Up => {
                self.move_selection(false);
                DialogResult::Pending
            }
            KeyCode::Down => {
                self.move_selection(true);
                DialogResult::Pending
            }
            KeyCode::Left => {
                self.input_cursor = self.input_cursor.saturating_sub(1);
                DialogResult::Pending
            }
            KeyCode::Right => {
                self.input_cursor = (self.input_cursor + 1).min(self.input.chars().count());
                DialogResult::Pending
            }
            KeyCode::Home => {
                self.input_cursor = 0;
                DialogResult::Pending
            }
            KeyCode::End => {
                self.input_cursor = self.input.chars().count();
                DialogResult::Pending
            }
            KeyCode::Backspace => {
                if self.input_cursor > 0 {
                    let idx = self.byte_index(self.input_cursor - 1);
                    self.input.remove(idx);
                    self.input_cursor -= 1;
                }
                self.list_focus = false;
                self.error = None;
                DialogResult::Pending
            }
            KeyCode::Delete => {
                if self.input_cursor < self.input.chars().count() {
                    let idx = self.byte_index(self.input_cursor);
                    self.input.remove(idx);
                }
                self.list_focus = false;
                self.error = None;
                DialogResult::Pending
            }
            KeyCode::Char(c) => {
                let idx = self.byte_index(self.input_cursor);
                self.input.insert(idx, c);
                self.input_cursor += 1;
                self.list_focus = false;
                self.error = None;
                DialogResult::Pending
            }
            _ => DialogResult::Pending,
        }
    }

    fn answer_replace(&mut self, key: KeyEvent, path: PathBuf) -> DialogResult {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                log::debug!("replace {}", path.display());
                DialogResult::Confirmed(path)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => DialogResult::Pending,
            _ => {
                self.pending_replace = Some(path);
                DialogResult::Pending
            }
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }

    fn set_input(&mut self, text: String) {
        self.input_cursor = text.chars().count();
        self.input = text;
    }

    fn cycle_filter(&mut self, step: usize) {
        let count = self.request.filters.len();
        if count == 0 {
            return;
        }
        self.filter_index = (self.filter_index + step) % count;
        self.refresh();
    }

    fn move_selection(&mut self, forward: bool) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        let next = match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(idx), true) => (idx + 1).min(last),
            (Some(idx), false) => idx.saturating_sub(1),
        };
        self.selected = Some(next);
        self.list_focus = true;

        let entry = &self.entries[next];
        if !entry.is_dir {
            let name = entry.name.clone();
            self.set_input(name);
        }
    }

    fn change_directory(&mut self, directory: PathBuf) {
        log::debug!("dialog directory {}", directory.display());
        self.directory = directory;
        self.error = None;
        self.refresh();
    }

    fn confirm(&mut self) -> DialogResult {
        // 一覧で選んだディレクトリへは入力欄の内容に関係なく移動する
        if self.list_focus {
            if let Some(entry) = self.selected.and_then(|idx| self.entries.get(idx)).cloned() {
                if entry.is_dir {
                    self.change_directory(entry.path);
                    return DialogResult::Pending;
                }
            }
        }

        let input = self.input.trim().to_string();
        if input.is_empty() {
            self.error = Some("Enter a file name".to_string());
            return DialogResult::Pending;
        }

        match expand_path(&input, &self.directory) {
            Ok(path) if path.is_dir() => {
                self.set_input(String::new());
                self.change_directory(path);
                DialogResult::Pending
            }
            Ok(path) => self.confirm_path(path),
            Err(err) => {
                self.error = Some(err.to_string());
                DialogResult::Pending
            }
        }
    }

    fn confirm_path(&mut self, path: PathBuf) -> DialogResult {
        match self.request.kind {
            DialogKind::Open => {
                if path.is_file() {
                    DialogResult::Confirmed(path)
                } else {
                    self.error = Some(format!("File not found: {}", path.display()));
                    DialogResult::Pending
                }
            }
            DialogKind::Save => {
                let path = with_default_extension(path, self.request.default_extension);
                if path.is_dir() {
                    self.error = Some(format!("{} is a directory", path.display()));
                    DialogResult::Pending
                } else if path.is_file() {
                    self.pending_replace = Some(path);
                    DialogResult::Pending
                } else {
                    DialogResult::Confirmed(path)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(dialog: &mut FileDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs").join("inner.txt"), "inner").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::write(dir.path().join("b.rs"), "b").unwrap();
        dir
    }

    #[test]
    fn save_dialog_suggests_untitled() {
        let dir = sample_dir();
        let dialog = FileDialog::new(DialogRequest::save(), dir.path().to_path_buf());
        assert_eq!(dialog.input(), "Untitled.txt");
        assert_eq!(dialog.title(), "Save As");
        assert_eq!(dialog.filter().pattern, "*.*");
    }

    #[test]
    fn tab_cycles_filters() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        let names = |d: &FileDialog| d.entries().iter().map(|e| e.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&dialog), vec!["..", "docs", "a.txt", "b.rs"]);

        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.filter().pattern, "*.txt");
        assert_eq!(names(&dialog), vec!["..", "docs", "a.txt"]);

        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.filter().pattern, "*.*");
    }

    #[test]
    fn open_confirms_existing_file() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        type_str(&mut dialog, "a.txt");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Confirmed(dir.path().join("a.txt"))
        );
    }

    #[test]
    fn open_rejects_missing_file_inline() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        type_str(&mut dialog, "missing.txt");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogResult::Pending);
        assert!(dialog.error().unwrap_or_default().contains("File not found"));

        dialog.handle_key(key(KeyCode::Backspace));
        assert!(dialog.error().is_none());
    }

    #[test]
    fn selecting_a_file_fills_input() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        // "..", "docs", "a.txt"
        dialog.handle_key(key(KeyCode::Down));
        dialog.handle_key(key(KeyCode::Down));
        dialog.handle_key(key(KeyCode::Down));
        assert_eq!(dialog.input(), "a.txt");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Confirmed(dir.path().join("a.txt"))
        );
    }

    #[test]
    fn enter_on_directory_descends() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        type_str(&mut dialog, "docs");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogResult::Pending);
        assert_eq!(dialog.directory(), dir.path().join("docs"));
        assert_eq!(dialog.input(), "");

        type_str(&mut dialog, "inner.txt");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Confirmed(dir.path().join("docs").join("inner.txt"))
        );
    }

    #[test]
    fn list_selected_directory_keeps_save_name() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::save(), dir.path().to_path_buf());
        dialog.handle_key(key(KeyCode::Down));
        dialog.handle_key(key(KeyCode::Down));
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogResult::Pending);
        assert_eq!(dialog.directory(), dir.path().join("docs"));
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Confirmed(dir.path().join("docs").join("Untitled.txt"))
        );
    }

    #[test]
    fn save_adds_default_extension() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::save(), dir.path().to_path_buf());
        dialog.handle_key(key(KeyCode::End));
        for _ in 0.."Untitled.txt".len() {
            dialog.handle_key(key(KeyCode::Backspace));
        }
        type_str(&mut dialog, "notes");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Confirmed(dir.path().join("notes.txt"))
        );
    }

    #[test]
    fn save_keeps_explicit_extension() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::save(), dir.path().to_path_buf());
        dialog.handle_key(key(KeyCode::Home));
        for _ in 0.."Untitled.txt".len() {
            dialog.handle_key(key(KeyCode::Delete));
        }
        type_str(&mut dialog, "main.rs");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogResult::Confirmed(dir.path().join("main.rs"))
        );
    }

    #[test]
    fn saving_over_existing_file_asks_first() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::save(), dir.path().to_path_buf());
        dialog.handle_key(key(KeyCode::End));
        for _ in 0.."Untitled.txt".len() {
            dialog.handle_key(key(KeyCode::Backspace));
        }
        type_str(&mut dialog, "a.txt");

        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogResult::Pending);
        assert_eq!(
            dialog.replace_prompt().as_deref(),
            Some("a.txt already exists. Replace? (y/n)")
        );

        // 他のキーでは確認を抜けない
        assert_eq!(dialog.handle_key(key(KeyCode::Tab)), DialogResult::Pending);
        assert!(dialog.replace_prompt().is_some());

        assert_eq!(dialog.handle_key(key(KeyCode::Char('n'))), DialogResult::Pending);
        assert!(dialog.replace_prompt().is_none());
        assert_eq!(dialog.input(), "a.txt");

        dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(
            dialog.handle_key(key(KeyCode::Char('y'))),
            DialogResult::Confirmed(dir.path().join("a.txt"))
        );
    }

    #[test]
    fn open_never_asks_to_replace() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        type_str(&mut dialog, "a.txt");
        dialog.handle_key(key(KeyCode::Enter));
        assert!(dialog.replace_prompt().is_none());
    }

    #[test]
    fn escape_cancels() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), DialogResult::Cancelled);
    }

    #[test]
    fn visible_range_follows_selection() {
        let dir = sample_dir();
        let mut dialog = FileDialog::new(DialogRequest::open(), dir.path().to_path_buf());
        for _ in 0..4 {
            dialog.handle_key(key(KeyCode::Down));
        }
        assert_eq!(dialog.visible_range(2), 2..4);
    }
}
