//! メインアプリケーション構造体
//!
//! ドキュメント状態・テキスト面・行番号ガター・履歴・クリップボード・テーマを
//! 1つのコントローラにまとめ、コマンドを同期的に処理する。
//! 描画やダイアログ表示はここでは行わず、`Effect` としてホストへ返す。

use crate::buffer::{normalize_line_endings, AtomicEdit, EditOperations, TextEditor};
use crate::command::{Command, DialogRequest, Effect, Outcome};
use crate::document::{Document, APP_NAME};
use crate::editor::{Clipboard, CursorSnapshot, HistoryCommandKind, HistoryEntry, HistoryStack};
use crate::error::{EditError, ErrorDisplay, ErrorLevel, NotepadError, Result};
use crate::file::{FileStore, FsFileStore};
use crate::gutter::LineGutter;
use crate::ui::theme::Theme;
use std::path::{Path, PathBuf};

/// About ダイアログの本文
pub const ABOUT_TEXT: &str = "Notepad for the terminal, written in Rust with ratatui";

/// notepad のコントローラ
pub struct Notepad<S: FileStore = FsFileStore> {
    document: Document,
    editor: TextEditor,
    gutter: LineGutter,
    history: HistoryStack,
    clipboard: Clipboard,
    theme: Theme,
    /// 単語単位の折り返し表示
    word_wrap: bool,
    store: S,
    running: bool,
}

impl Notepad<FsFileStore> {
    /// 実ファイルシステムとシステムクリップボードを使って起動する
    pub fn new() -> Self {
        Self::with_parts(FsFileStore, Clipboard::new())
    }
}

impl Default for Notepad<FsFileStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FileStore> Notepad<S> {
    /// 依存を指定して構築（無題・空・ライトモード）
    pub fn with_parts(store: S, clipboard: Clipboard) -> Self {
        let mut notepad = Self {
            document: Document::new(),
            editor: TextEditor::new(),
            gutter: LineGutter::new(),
            history: HistoryStack::new(),
            clipboard,
            theme: Theme::new(),
            word_wrap: true,
            store,
            running: true,
        };
        notepad.resync_gutter();
        notepad
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn editor(&self) -> &TextEditor {
        &self.editor
    }

    pub fn gutter(&self) -> &LineGutter {
        &self.gutter
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// バッファ全体のテキスト
    pub fn text(&self) -> String {
        self.editor.text()
    }

    /// コマンドを実行する
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        log::debug!("dispatch {:?} ({})", command, command.description());
        let text_input = command.is_text_input();

        let outcome = match command {
            Command::New => self.new_document(),
            Command::Open => Outcome::with_effect(Effect::ShowDialog(DialogRequest::open())),
            Command::OpenDialogClosed(None) => Outcome::none(),
            Command::OpenDialogClosed(Some(path)) => self.open_path(path),
            Command::Save => self.save(),
            Command::SaveDialogClosed(None) => Outcome::none(),
            Command::SaveDialogClosed(Some(path)) => self.save_to(path),
            Command::Exit => {
                self.running = false;
                Outcome::with_effect(Effect::Quit)
            }
            Command::Cut => self.cut(),
            Command::Copy => self.copy(),
            Command::Paste => self.paste(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SelectAll => {
                self.editor.select_all();
                Outcome::none()
            }
            Command::ToggleDarkMode => {
                let dark = self.theme.toggle();
                log::info!("dark mode {}", if dark { "on" } else { "off" });
                Outcome::none()
            }
            Command::ToggleWordWrap => {
                self.word_wrap = !self.word_wrap;
                log::info!("word wrap {}", if self.word_wrap { "on" } else { "off" });
                Outcome::none()
            }
            Command::About => Outcome::with_effect(Effect::ShowMessage(ErrorDisplay {
                title: APP_NAME.to_string(),
                message: ABOUT_TEXT.to_string(),
                level: ErrorLevel::Info,
            })),
            Command::InsertChar(ch) => {
                self.edit(HistoryCommandKind::InsertChar, |editor| editor.insert_char(ch))
            }
            Command::InsertText(text) => self.insert_text(&text),
            Command::InsertNewline => {
                self.edit(HistoryCommandKind::Other, |editor| editor.insert_newline())
            }
            Command::DeleteBackward => {
                self.edit(HistoryCommandKind::DeleteBackward, |editor| editor.delete_backward())
            }
            Command::DeleteForward => {
                self.edit(HistoryCommandKind::Other, |editor| editor.delete_forward())
            }
            Command::Move { movement, extend } => {
                self.editor.navigate(movement, extend);
                Outcome::none()
            }
            Command::BufferChanged => Outcome::changed(),
        };

        // テキスト面へのキー入力ごと、およびバッファ変更ごとに再同期する
        if text_input || outcome.buffer_changed {
            self.resync_gutter();
        }
        outcome
    }

    /// 行番号ガターをバッファの行数に合わせる
    pub fn resync_gutter(&mut self) {
        self.gutter.resync(self.editor.line_count());
    }

    fn title_effect(&self) -> Effect {
        Effect::SetTitle(self.document.title())
    }

    fn new_document(&mut self) -> Outcome {
        self.document.reset();
        self.editor.replace_all("");
        self.history.clear();
        log::info!("new document");

        let mut outcome = Outcome::changed();
        outcome.push(self.title_effect());
        outcome
    }

    fn open_path(&mut self, path: PathBuf) -> Outcome {
        match self.store.read_to_string(&path) {
            Ok(content) => {
                let content = normalize_line_endings(&content);
                self.editor.replace_all(&content);
                self.history.clear();
                log::info!("opened {}", path.display());
                self.document.bind(path);

                let mut outcome = Outcome::changed();
                outcome.push(self.title_effect());
                outcome
            }
            Err(err) => self.report_failure("open", &path, err),
        }
    }

    fn save(&mut self) -> Outcome {
        match self.document.path().map(Path::to_path_buf) {
            Some(path) => self.save_to(path),
            None => Outcome::with_effect(Effect::ShowDialog(DialogRequest::save())),
        }
    }

    fn save_to(&mut self, path: PathBuf) -> Outcome {
        let content = self.editor.text();
        match self.store.write(&path, &content) {
            Ok(()) => {
                log::info!("saved {} ({} bytes)", path.display(), content.len());
                self.document.bind(path);
                Outcome::with_effect(self.title_effect())
            }
            Err(err) => self.report_failure("save", &path, err),
        }
    }

    /// I/O の失敗をメッセージとして返す（ドキュメント状態は変えない）
    fn report_failure(&self, operation: &str, path: &Path, err: NotepadError) -> Outcome {
        log::warn!("{} {} failed: {}", operation, path.display(), err);
        Outcome::with_effect(Effect::ShowMessage(ErrorDisplay::new(&err)))
    }

    /// 編集を実行して履歴に記録する
    fn edit<F>(&mut self, kind: HistoryCommandKind, operation: F) -> Outcome
    where
        F: FnOnce(&mut TextEditor) -> Result<Vec<AtomicEdit>>,
    {
        let cursor_before = CursorSnapshot::from_editor(&self.editor);
        match operation(&mut self.editor) {
            Ok(operations) => self.record(kind, operations, cursor_before),
            Err(NotepadError::Edit(
                EditError::AtBufferStart | EditError::AtBufferEnd | EditError::InvalidChar(_),
            )) => Outcome::none(),
            Err(err) => Outcome::with_effect(Effect::ShowMessage(ErrorDisplay::new(&err))),
        }
    }

    fn record(
        &mut self,
        kind: HistoryCommandKind,
        operations: Vec<AtomicEdit>,
        cursor_before: CursorSnapshot,
    ) -> Outcome {
        if operations.is_empty() {
            return Outcome::none();
        }
        self.history.push(HistoryEntry {
            command_kind: kind,
            operations,
            cursor_before,
            cursor_after: CursorSnapshot::from_editor(&self.editor),
        });
        self.document.mark_modified();
        Outcome::changed()
    }

    fn copy_selection(&mut self) -> Option<Outcome> {
        let text = self.editor.selected_text()?;
        if let Err(err) = self.clipboard.set_text(&text) {
            // レジスタには格納済みなので、同一プロセス内の貼り付けは可能
            log::warn!("clipboard write failed: {}", err);
        }
        Some(Outcome::none())
    }

    fn copy(&mut self) -> Outcome {
        self.copy_selection().unwrap_or_default()
    }

    fn cut(&mut self) -> Outcome {
        if self.copy_selection().is_none() {
            return Outcome::none();
        }
        self.edit(HistoryCommandKind::Other, |editor| editor.delete_selection())
    }

    fn paste(&mut self) -> Outcome {
        let Some(text) = self.clipboard.get_text() else {
            return Outcome::none();
        };
        if text.is_empty() {
            return Outcome::none();
        }
        self.edit(HistoryCommandKind::Other, |editor| editor.insert_str(&text))
    }

    fn insert_text(&mut self, text: &str) -> Outcome {
        if text.is_empty() {
            return Outcome::none();
        }
        self.edit(HistoryCommandKind::Other, |editor| editor.insert_str(text))
    }

    fn undo(&mut self) -> Outcome {
        match self.history.undo(&mut self.editor) {
            Ok(true) => {
                self.document.mark_modified();
                Outcome::changed()
            }
            Ok(false) => Outcome::none(),
            Err(err) => Outcome::with_effect(Effect::ShowMessage(ErrorDisplay::new(&err))),
        }
    }

    fn redo(&mut self) -> Outcome {
        match self.history.redo(&mut self.editor) {
            Ok(true) => {
                self.document.mark_modified();
                Outcome::changed()
            }
            Ok(false) => Outcome::none(),
            Err(err) => Outcome::with_effect(Effect::ShowMessage(ErrorDisplay::new(&err))),
        }
    }
}
