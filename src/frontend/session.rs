//! 端末に依存しないセッション
//!
//! キー入力をモーダル・メニュー・キーマップの順に振り分け、コントローラが返した
//! `Effect` をダイアログ表示やタイトル更新として適用する。

use crate::app::Notepad;
use crate::command::{Command, DialogKind, Effect, Outcome};
use crate::dialog::{DialogResult, FileDialog, MessageBox, Overlay};
use crate::file::{FileStore, FsFileStore};
use crate::input::{KeyAction, KeyMap, DEFAULT_PAGE_LINES};
use crate::ui::{MenuBar, MenuResult, RenderView, Renderer};
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::path::{Path, PathBuf};

pub struct Session<S: FileStore = FsFileStore> {
    notepad: Notepad<S>,
    menu: MenuBar,
    keymap: KeyMap,
    overlay: Option<Overlay>,
    renderer: Renderer,
    title: String,
    /// 端末へ未反映のタイトル
    pending_title: Option<String>,
    /// ダイアログの初期ディレクトリ（無題ドキュメント用）
    start_dir: PathBuf,
}

impl<S: FileStore> Session<S> {
    pub fn new(notepad: Notepad<S>, start_dir: PathBuf) -> Self {
        let title = notepad.title();
        Self {
            notepad,
            menu: MenuBar::new(),
            keymap: KeyMap::new(),
            overlay: None,
            renderer: Renderer::new(),
            pending_title: Some(title.clone()),
            title,
            start_dir,
        }
    }

    pub fn notepad(&self) -> &Notepad<S> {
        &self.notepad
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// 現在のウィンドウタイトル
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 端末へ反映すべきタイトルを取り出す
    pub fn take_title(&mut self) -> Option<String> {
        self.pending_title.take()
    }

    pub fn is_running(&self) -> bool {
        self.notepad.is_running()
    }

    /// キー入力を処理する
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if let Some(overlay) = self.overlay.as_mut() {
            match overlay {
                Overlay::File(dialog) => {
                    let kind = dialog.kind();
                    match dialog.handle_key(key) {
                        DialogResult::Pending => {}
                        DialogResult::Confirmed(path) => {
                            self.overlay = None;
                            self.dispatch(dialog_closed(kind, Some(path)));
                        }
                        DialogResult::Cancelled => {
                            self.overlay = None;
                            self.dispatch(dialog_closed(kind, None));
                        }
                    }
                }
                Overlay::Message(message) => {
                    if message.handle_key(key) {
                        self.overlay = None;
                    }
                }
            }
            return;
        }

        if self.menu.is_open() {
            if let MenuResult::Activated(command) = self.menu.handle_key(key) {
                self.dispatch(command);
            }
            return;
        }

        let page_lines = match self.renderer.page_lines() {
            0 | 1 => DEFAULT_PAGE_LINES,
            lines => lines,
        };
        match self.keymap.resolve(key, page_lines) {
            KeyAction::Command(command) => self.dispatch(command),
            KeyAction::OpenMenu(None) => self.menu.open(0),
            KeyAction::OpenMenu(Some(c)) => {
                self.menu.open_by_mnemonic(c);
            }
            KeyAction::Unbound => {}
        }
    }

    /// 貼り付けイベント（ブラケットペースト）を1回の編集として挿入する
    pub fn handle_paste(&mut self, text: &str) {
        if self.overlay.is_some() || self.menu.is_open() {
            return;
        }
        self.dispatch(Command::InsertText(text.to_string()));
    }

    /// コマンドを実行して副作用を適用する
    pub fn dispatch(&mut self, command: Command) {
        let replaces_buffer = matches!(command, Command::New | Command::OpenDialogClosed(Some(_)));
        let outcome = self.notepad.dispatch(command);
        if replaces_buffer && outcome.buffer_changed {
            self.renderer.reset_scroll();
        }
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        for effect in outcome.effects {
            match effect {
                Effect::ShowDialog(request) => {
                    let dir = self.dialog_directory();
                    self.overlay = Some(Overlay::File(FileDialog::new(request, dir)));
                }
                Effect::ShowMessage(display) => {
                    self.overlay = Some(Overlay::Message(MessageBox::new(display)));
                }
                Effect::SetTitle(title) => {
                    log::debug!("title {}", title);
                    self.pending_title = Some(title.clone());
                    self.title = title;
                }
                Effect::Quit => {
                    self.overlay = None;
                    self.menu.close();
                }
            }
        }
    }

    /// 開いているファイルのディレクトリ、なければ起動ディレクトリ
    fn dialog_directory(&self) -> PathBuf {
        self.notepad
            .document()
            .path()
            .and_then(Path::parent)
            .filter(|dir| dir.is_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.start_dir.clone())
    }

    /// 現在の状態を描画する
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let view = RenderView {
            title: &self.title,
            document: self.notepad.document(),
            editor: self.notepad.editor(),
            gutter: self.notepad.gutter(),
            theme: self.notepad.theme(),
            word_wrap: self.notepad.word_wrap(),
            menu: &self.menu,
            overlay: self.overlay.as_mut(),
        };
        self.renderer.render(terminal, view)
    }
}

fn dialog_closed(kind: DialogKind, path: Option<PathBuf>) -> Command {
    match kind {
        DialogKind::Open => Command::OpenDialogClosed(path),
        DialogKind::Save => Command::SaveDialogClosed(path),
    }
}
