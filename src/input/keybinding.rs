//! キーバインドシステム
//!
//! 一般的なメモ帳風のショートカットを `Command` へ対応付ける

use crate::buffer::Movement;
use crate::command::Command;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyEventKind, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;

/// ページ移動の既定行数（描画前のフォールバック）
pub const DEFAULT_PAGE_LINES: usize = 20;

/// キー入力の内部表現
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
            code: KeyCode::Char(c),
        }
    }

    /// Ctrl+Alt の同時押し（Windows では AltGr がこう届く）
    pub fn is_altgr(&self) -> bool {
        self.modifiers.ctrl && self.modifiers.alt
    }

    /// 文字入力か。修飾なし（Shift は可）または AltGr
    pub fn is_insertable_char(&self) -> bool {
        matches!(self.code, KeyCode::Char(c) if !c.is_control())
            && (self.is_altgr() || (!self.modifiers.ctrl && !self.modifiers.alt))
    }
}

/// crossterm統合
impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            // Ctrl/Alt 付きの文字は大文字小文字を区別しない（AltGr の文字はそのまま）
            CrosstermKeyCode::Char(c) if modifiers.ctrl != modifiers.alt => {
                KeyCode::Char(c.to_ascii_lowercase())
            }
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::PageUp => KeyCode::PageUp,
            CrosstermKeyCode::PageDown => KeyCode::PageDown,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// キー処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// コマンドを実行
    Command(Command),
    /// メニューバーを開く（頭文字指定なしは先頭メニュー）
    OpenMenu(Option<char>),
    /// 割り当てなし
    Unbound,
}

/// キーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    pub fn new() -> Self {
        let mut bindings = HashMap::with_capacity(16);
        Self::register_bindings(&mut bindings);
        Self { bindings }
    }

    fn register_bindings(bindings: &mut HashMap<Key, Command>) {
        // ファイル
        bindings.insert(Key::ctrl('n'), Command::New);
        bindings.insert(Key::ctrl('o'), Command::Open);
        bindings.insert(Key::ctrl('s'), Command::Save);
        bindings.insert(Key::ctrl('q'), Command::Exit);

        // 編集
        bindings.insert(Key::ctrl('x'), Command::Cut);
        bindings.insert(Key::ctrl('c'), Command::Copy);
        bindings.insert(Key::ctrl('v'), Command::Paste);
        bindings.insert(Key::ctrl('z'), Command::Undo);
        bindings.insert(Key::ctrl('y'), Command::Redo);
        bindings.insert(Key::ctrl('a'), Command::SelectAll);

        // 表示・ヘルプ
        bindings.insert(Key::ctrl('d'), Command::ToggleDarkMode);
        bindings.insert(Key::ctrl('w'), Command::ToggleWordWrap);
        bindings.insert(Key::plain(KeyCode::F(1)), Command::About);

        bindings.insert(Key::plain(KeyCode::Enter), Command::InsertNewline);
        bindings.insert(Key::plain(KeyCode::Backspace), Command::DeleteBackward);
        bindings.insert(Key::plain(KeyCode::Delete), Command::DeleteForward);
        bindings.insert(Key::plain(KeyCode::Tab), Command::InsertChar('\t'));
    }

    /// キーイベントを解決する。`page_lines` はページ移動の行数。
    pub fn resolve(&self, event: KeyEvent, page_lines: usize) -> KeyAction {
        if event.kind == KeyEventKind::Release {
            return KeyAction::Unbound;
        }
        let key = Key::from(event);

        if key.code == KeyCode::F(10) {
            return KeyAction::OpenMenu(None);
        }
        if key.modifiers.alt && !key.modifiers.ctrl {
            if let KeyCode::Char(c) = key.code {
                return KeyAction::OpenMenu(Some(c));
            }
        }

        if let Some(movement) = Self::movement(key.code, key.modifiers.ctrl, page_lines) {
            return KeyAction::Command(Command::Move {
                movement,
                extend: key.modifiers.shift,
            });
        }

        if let Some(command) = self.bindings.get(&key) {
            return KeyAction::Command(command.clone());
        }
        // Shift+Enter 等は修飾なしとして扱う
        if key.modifiers.shift && !key.modifiers.ctrl && !key.modifiers.alt {
            let unshifted = Key::plain(key.code);
            if !matches!(key.code, KeyCode::Char(_)) {
                if let Some(command) = self.bindings.get(&unshifted) {
                    return KeyAction::Command(command.clone());
                }
            }
        }

        if key.is_insertable_char() {
            if let KeyCode::Char(c) = key.code {
                return KeyAction::Command(Command::InsertChar(c));
            }
        }

        KeyAction::Unbound
    }

    fn movement(code: KeyCode, ctrl: bool, page_lines: usize) -> Option<Movement> {
        let page = page_lines.max(1);
        match (code, ctrl) {
            (KeyCode::Left, _) => Some(Movement::Left),
            (KeyCode::Right, _) => Some(Movement::Right),
            (KeyCode::Up, _) => Some(Movement::Up),
            (KeyCode::Down, _) => Some(Movement::Down),
            (KeyCode::Home, false) => Some(Movement::LineStart),
            (KeyCode::End, false) => Some(Movement::LineEnd),
            (KeyCode::Home, true) => Some(Movement::BufferStart),
            (KeyCode::End, true) => Some(Movement::BufferEnd),
            (KeyCode::PageUp, _) => Some(Movement::PageUp(page)),
            (KeyCode::PageDown, _) => Some(Movement::PageDown(page)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: CrosstermKeyCode, modifiers: CrosstermModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn accelerators_map_to_commands() {
        let map = KeyMap::new();
        let cases = [
            ('n', Command::New),
            ('o', Command::Open),
            ('s', Command::Save),
            ('q', Command::Exit),
            ('x', Command::Cut),
            ('c', Command::Copy),
            ('v', Command::Paste),
            ('z', Command::Undo),
            ('y', Command::Redo),
            ('d', Command::ToggleDarkMode),
            ('w', Command::ToggleWordWrap),
        ];
        for (c, expected) in cases {
            assert_eq!(
                map.resolve(event(CrosstermKeyCode::Char(c), CrosstermModifiers::CONTROL), 10),
                KeyAction::Command(expected)
            );
        }
    }

    #[test]
    fn ctrl_letters_ignore_case() {
        let map = KeyMap::new();
        assert_eq!(
            map.resolve(
                event(
                    CrosstermKeyCode::Char('S'),
                    CrosstermModifiers::CONTROL | CrosstermModifiers::SHIFT
                ),
                10
            ),
            KeyAction::Unbound
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('S'), CrosstermModifiers::CONTROL), 10),
            KeyAction::Command(Command::Save)
        );
    }

    #[test]
    fn printable_characters_insert() {
        let map = KeyMap::new();
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('A'), CrosstermModifiers::SHIFT), 10),
            KeyAction::Command(Command::InsertChar('A'))
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('あ'), CrosstermModifiers::NONE), 10),
            KeyAction::Command(Command::InsertChar('あ'))
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Enter, CrosstermModifiers::SHIFT), 10),
            KeyAction::Command(Command::InsertNewline)
        );
    }

    #[test]
    fn altgr_characters_insert() {
        let map = KeyMap::new();
        let altgr = CrosstermModifiers::CONTROL | CrosstermModifiers::ALT;
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('@'), altgr), 10),
            KeyAction::Command(Command::InsertChar('@'))
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('{'), altgr), 10),
            KeyAction::Command(Command::InsertChar('{'))
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('@'), CrosstermModifiers::CONTROL), 10),
            KeyAction::Unbound
        );
    }

    #[test]
    fn shift_arrows_extend_selection() {
        let map = KeyMap::new();
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Right, CrosstermModifiers::SHIFT), 10),
            KeyAction::Command(Command::Move { movement: Movement::Right, extend: true })
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::End, CrosstermModifiers::CONTROL), 10),
            KeyAction::Command(Command::Move { movement: Movement::BufferEnd, extend: false })
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::PageDown, CrosstermModifiers::NONE), 7),
            KeyAction::Command(Command::Move { movement: Movement::PageDown(7), extend: false })
        );
    }

    #[test]
    fn menu_keys() {
        let map = KeyMap::new();
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::F(10), CrosstermModifiers::NONE), 10),
            KeyAction::OpenMenu(None)
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::Char('f'), CrosstermModifiers::ALT), 10),
            KeyAction::OpenMenu(Some('f'))
        );
        assert_eq!(
            map.resolve(event(CrosstermKeyCode::F(1), CrosstermModifiers::NONE), 10),
            KeyAction::Command(Command::About)
        );
    }
}
