//! 編集履歴（Undo/Redo）
//!
//! 深さに上限のある明示的な履歴スタック。連続した単語文字の入力と削除は
//! 1つの取り消し単位にまとめる。

use crate::buffer::{AtomicEdit, TextEditor};
use crate::error::Result;
use std::collections::VecDeque;

/// 既定の履歴深さ
pub const DEFAULT_HISTORY_DEPTH: usize = 1000;

/// コマンド種別（マージ判定用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommandKind {
    InsertChar,
    DeleteBackward,
    Other,
}

/// カーソルと選択範囲のスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub char_pos: usize,
    pub anchor: Option<usize>,
}

impl CursorSnapshot {
    pub fn from_editor(editor: &TextEditor) -> Self {
        Self {
            char_pos: editor.cursor().char_pos,
            anchor: editor.anchor(),
        }
    }
}

/// 履歴エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub command_kind: HistoryCommandKind,
    pub operations: Vec<AtomicEdit>,
    pub cursor_before: CursorSnapshot,
    pub cursor_after: CursorSnapshot,
}

impl HistoryEntry {
    fn can_merge(&self, other: &HistoryEntry) -> bool {
        let (prev, next) = match (self.operations.as_slice(), other.operations.as_slice()) {
            ([prev], [next]) => (prev, next),
            _ => return false,
        };

        match (self.command_kind, other.command_kind, prev, next) {
            (
                HistoryCommandKind::InsertChar,
                HistoryCommandKind::InsertChar,
                AtomicEdit::Insert { position: prev_pos, text: prev_text },
                AtomicEdit::Insert { position: new_pos, text: new_text },
            ) => {
                is_word_text(prev_text)
                    && is_word_text(new_text)
                    && *new_pos == prev_pos + prev_text.chars().count()
            }
            (
                HistoryCommandKind::DeleteBackward,
                HistoryCommandKind::DeleteBackward,
                AtomicEdit::Delete { position: prev_pos, text: prev_text },
                AtomicEdit::Delete { position: new_pos, text: new_text },
            ) => {
                is_word_text(prev_text)
                    && is_word_text(new_text)
                    && new_pos + new_text.chars().count() == *prev_pos
            }
            _ => false,
        }
    }

    fn merge_with(&mut self, other: HistoryEntry) {
        if let (Some(prev), Some(next)) = (self.operations.first_mut(), other.operations.first()) {
            match (prev, next) {
                (AtomicEdit::Insert { text: prev_text, .. }, AtomicEdit::Insert { text, .. }) => {
                    prev_text.push_str(text);
                }
                (
                    AtomicEdit::Delete { position: prev_pos, text: prev_text },
                    AtomicEdit::Delete { position, text },
                ) => {
                    *prev_pos = *position;
                    prev_text.insert_str(0, text);
                }
                _ => {}
            }
        }
        self.cursor_after = other.cursor_after;
    }
}

fn is_word_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// 編集履歴スタック
#[derive(Debug, Clone)]
pub struct HistoryStack {
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    max_depth: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// 新しい編集を記録（Redo 履歴は破棄される）
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        if let Some(last) = self.undo.back_mut() {
            if last.can_merge(&entry) {
                last.merge_with(entry);
                return;
            }
        }
        self.undo.push_back(entry);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
    }

    /// 履歴を全て破棄
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// 直前の編集を取り消す。取り消す履歴がなければ `false`
    pub fn undo(&mut self, editor: &mut TextEditor) -> Result<bool> {
        let Some(entry) = self.undo.pop_back() else {
            return Ok(false);
        };

        for op in entry.operations.iter().rev() {
            if let Err(err) = editor.apply(&op.inverse()) {
                self.undo.push_back(entry);
                return Err(err);
            }
        }
        editor.restore_selection(entry.cursor_before.anchor, entry.cursor_before.char_pos);
        self.redo.push(entry);
        Ok(true)
    }

    /// 取り消した編集をやり直す。やり直す履歴がなければ `false`
    pub fn redo(&mut self, editor: &mut TextEditor) -> Result<bool> {
        let Some(entry) = self.redo.pop() else {
            return Ok(false);
        };

        for op in &entry.operations {
            if let Err(err) = editor.apply(op) {
                self.redo.push(entry);
                return Err(err);
            }
        }
        editor.restore_selection(entry.cursor_after.anchor, entry.cursor_after.char_pos);
        self.undo.push_back(entry);
        Ok(true)
    }
}
