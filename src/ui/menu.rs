//! メニューバー
//!
//! File / Edit / Help / View の4メニュー。F10 または Alt+頭文字で開き、
//! 矢印キーで移動、Enter で項目のコマンドを返す。

use crate::command::Command;
use crossterm::event::{KeyCode, KeyEvent};

/// メニュー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    /// 表示用のショートカット（`"Ctrl+S"` など）
    pub accelerator: &'static str,
    pub command: Command,
}

impl MenuItem {
    fn new(label: &'static str, accelerator: &'static str, command: Command) -> Self {
        Self {
            label,
            accelerator,
            command,
        }
    }

    /// 項目のアクセスキー（ラベルの頭文字）
    pub fn mnemonic(&self) -> Option<char> {
        self.label.chars().next().map(|c| c.to_ascii_lowercase())
    }
}

/// ドロップダウンメニュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn mnemonic(&self) -> Option<char> {
        self.title.chars().next().map(|c| c.to_ascii_lowercase())
    }
}

/// キー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuResult {
    /// メニューは開いたまま
    Pending,
    /// 項目が選ばれた（メニューは閉じる）
    Activated(Command),
    /// 何も選ばずに閉じた
    Closed,
}

/// メニューバーの状態
#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    /// 開いているメニュー
    open: Option<usize>,
    /// 選択中の項目
    selected: usize,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBar {
    pub fn new() -> Self {
        let menus = vec![
            Menu {
                title: "File",
                items: vec![
                    MenuItem::new("New", "Ctrl+N", Command::New),
                    MenuItem::new("Open...", "Ctrl+O", Command::Open),
                    MenuItem::new("Save", "Ctrl+S", Command::Save),
                    MenuItem::new("Exit", "Ctrl+Q", Command::Exit),
                ],
            },
            Menu {
                title: "Edit",
                items: vec![
                    MenuItem::new("Cut", "Ctrl+X", Command::Cut),
                    MenuItem::new("Copy", "Ctrl+C", Command::Copy),
                    MenuItem::new("Paste", "Ctrl+V", Command::Paste),
                    MenuItem::new("Undo", "Ctrl+Z", Command::Undo),
                    MenuItem::new("Redo", "Ctrl+Y", Command::Redo),
                ],
            },
            Menu {
                title: "Help",
                items: vec![MenuItem::new("About Notepad", "F1", Command::About)],
            },
            Menu {
                title: "View",
                items: vec![
                    MenuItem::new("Toggle Dark Mode", "Ctrl+D", Command::ToggleDarkMode),
                    MenuItem::new("Word Wrap", "Ctrl+W", Command::ToggleWordWrap),
                ],
            },
        ];

        Self {
            menus,
            open: None,
            selected: 0,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// 開いているメニューの番号
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    /// 開いているメニュー
    pub fn active(&self) -> Option<&Menu> {
        self.open.and_then(|idx| self.menus.get(idx))
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 指定したメニューを開く
    pub fn open(&mut self, index: usize) {
        if index < self.menus.len() {
            self.open = Some(index);
            self.selected = 0;
        }
    }

    /// 頭文字でメニューを開く（Alt+F など）
    pub fn open_by_mnemonic(&mut self, key: char) -> bool {
        let key = key.to_ascii_lowercase();
        match self.menus.iter().position(|menu| menu.mnemonic() == Some(key)) {
            Some(index) => {
                self.open(index);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected = 0;
    }

    /// 開いている間のキー処理
    pub fn handle_key(&mut self, key: KeyEvent) -> MenuResult {
        let Some(open) = self.open else {
            return MenuResult::Closed;
        };
        let item_count = self.menus[open].items.len();

        match key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuResult::Closed
            }
            KeyCode::Left => {
                self.open((open + self.menus.len() - 1) % self.menus.len());
                MenuResult::Pending
            }
            KeyCode::Right | KeyCode::Tab => {
                self.open((open + 1) % self.menus.len());
                MenuResult::Pending
            }
            KeyCode::Up => {
                self.selected = (self.selected + item_count - 1) % item_count;
                MenuResult::Pending
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % item_count;
                MenuResult::Pending
            }
            KeyCode::Enter => self.activate(self.selected),
            KeyCode::Char(c) => {
                let c = c.to_ascii_lowercase();
                match self.menus[open]
                    .items
                    .iter()
                    .position(|item| item.mnemonic() == Some(c))
                {
                    Some(index) => self.activate(index),
                    None => MenuResult::Pending,
                }
            }
            _ => MenuResult::Pending,
        }
    }

    fn activate(&mut self, index: usize) -> MenuResult {
        let command = self
            .active()
            .and_then(|menu| menu.items.get(index))
            .map(|item| item.command.clone());
        self.close();
        match command {
            Some(command) => MenuResult::Activated(command),
            None => MenuResult::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn menu_order_and_titles() {
        let bar = MenuBar::new();
        let titles: Vec<&str> = bar.menus().iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["File", "Edit", "Help", "View"]);
        assert!(!bar.is_open());
    }

    #[test]
    fn navigate_and_activate() {
        let mut bar = MenuBar::new();
        bar.open(0);
        assert_eq!(bar.handle_key(key(KeyCode::Down)), MenuResult::Pending);
        assert_eq!(bar.handle_key(key(KeyCode::Enter)), MenuResult::Activated(Command::Open));
        assert!(!bar.is_open());
    }

    #[test]
    fn left_wraps_to_last_menu() {
        let mut bar = MenuBar::new();
        bar.open(0);
        bar.handle_key(key(KeyCode::Left));
        assert_eq!(bar.active().map(|m| m.title), Some("View"));
        assert_eq!(
            bar.handle_key(key(KeyCode::Enter)),
            MenuResult::Activated(Command::ToggleDarkMode)
        );
    }

    #[test]
    fn mnemonics_open_and_activate() {
        let mut bar = MenuBar::new();
        assert!(bar.open_by_mnemonic('E'));
        assert_eq!(bar.handle_key(key(KeyCode::Char('r'))), MenuResult::Activated(Command::Redo));
        assert!(!bar.open_by_mnemonic('z'));
    }

    #[test]
    fn view_menu_toggles_word_wrap() {
        let mut bar = MenuBar::new();
        assert!(bar.open_by_mnemonic('v'));
        assert_eq!(
            bar.handle_key(key(KeyCode::Char('w'))),
            MenuResult::Activated(Command::ToggleWordWrap)
        );
    }

    #[test]
    fn escape_closes() {
        let mut bar = MenuBar::new();
        bar.open(2);
        assert_eq!(bar.handle_key(key(KeyCode::Esc)), MenuResult::Closed);
        assert!(!bar.is_open());
    }
}
