//! エディタ操作インターフェース
//!
//! ギャップバッファにカーソルと選択範囲を組み合わせた編集面。
//! 編集メソッドは実際に行った変更を `AtomicEdit` として返し、履歴管理に渡される。

use crate::buffer::{
    cursor::CursorPosition,
    gap_buffer::GapBuffer,
    operations::{AtomicEdit, Movement},
};
use crate::error::{EditError, Result};

/// 編集操作インターフェース
pub trait EditOperations {
    /// 文字を挿入（選択範囲があれば置き換える）
    fn insert_char(&mut self, ch: char) -> Result<Vec<AtomicEdit>>;

    /// 文字列を挿入（選択範囲があれば置き換える）
    fn insert_str(&mut self, s: &str) -> Result<Vec<AtomicEdit>>;

    /// 改行を挿入
    fn insert_newline(&mut self) -> Result<Vec<AtomicEdit>>;

    /// Backspace削除
    fn delete_backward(&mut self) -> Result<Vec<AtomicEdit>>;

    /// Delete削除
    fn delete_forward(&mut self) -> Result<Vec<AtomicEdit>>;

    /// 選択範囲を削除
    fn delete_selection(&mut self) -> Result<Vec<AtomicEdit>>;
}

/// テキストエディタ本体
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    buffer: GapBuffer,
    cursor: CursorPosition,
    /// 選択開始位置（Shift移動で設定）
    anchor: Option<usize>,
    /// 上下移動時に維持する列
    preferred_column: Option<usize>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            buffer: GapBuffer::from_str(s),
            ..Self::default()
        }
    }

    /// バッファ全体のテキスト
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// バッファ全体を置き換え、カーソルを先頭へ戻す
    pub fn replace_all(&mut self, text: &str) {
        self.buffer.replace_all(text);
        self.anchor = None;
        self.preferred_column = None;
        self.cursor = CursorPosition::new();
    }

    /// 行数（空バッファでも1）
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// 各行の文字列（改行を含まない、常に `line_count()` 個）
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }

    pub fn cursor(&self) -> &CursorPosition {
        &self.cursor
    }

    /// 文字位置へカーソルを移動
    pub fn set_cursor_char(&mut self, char_pos: usize, extend_selection: bool) {
        self.update_anchor(extend_selection);
        self.place_cursor(char_pos);
        self.preferred_column = None;
        self.drop_empty_selection();
    }

    /// 正規化済みの選択範囲 `(start, end)`（空選択は `None`）
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        let pos = self.cursor.char_pos;
        match anchor.cmp(&pos) {
            std::cmp::Ordering::Less => Some((anchor, pos)),
            std::cmp::Ordering::Greater => Some((pos, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection()?;
        self.buffer.substring(start, end).ok()
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.place_cursor(self.buffer.len_chars());
        self.drop_empty_selection();
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// 選択範囲のアンカーを復元（Undo/Redo 用）
    pub fn restore_selection(&mut self, anchor: Option<usize>, char_pos: usize) {
        self.anchor = anchor.map(|a| a.min(self.buffer.len_chars()));
        self.place_cursor(char_pos);
        self.drop_empty_selection();
    }

    /// カーソル移動
    pub fn navigate(&mut self, movement: Movement, extend_selection: bool) {
        if !extend_selection {
            // 選択中に左右移動したら選択端へ寄せる
            if let Some((start, end)) = self.selection() {
                match movement {
                    Movement::Left => {
                        self.anchor = None;
                        self.place_cursor(start);
                        return;
                    }
                    Movement::Right => {
                        self.anchor = None;
                        self.place_cursor(end);
                        return;
                    }
                    _ => {}
                }
            }
        }
        self.update_anchor(extend_selection);

        let line_starts = self.buffer.line_start_positions();
        let len = self.buffer.len_chars();
        let line = self.cursor.line;
        let line_end = |idx: usize| -> usize {
            line_starts
                .get(idx + 1)
                .map(|next| next - 1)
                .unwrap_or(len)
        };

        let vertical = |editor: &mut Self, target_line: usize| {
            let column = editor.preferred_column.unwrap_or(editor.cursor.column);
            let start = line_starts[target_line];
            let target = (start + column).min(line_end(target_line));
            editor.place_cursor(target);
            editor.preferred_column = Some(column);
        };

        match movement {
            Movement::Left => {
                self.place_cursor(self.cursor.char_pos.saturating_sub(1));
                self.preferred_column = None;
            }
            Movement::Right => {
                self.place_cursor((self.cursor.char_pos + 1).min(len));
                self.preferred_column = None;
            }
            Movement::Up => {
                if line == 0 {
                    self.place_cursor(0);
                    self.preferred_column = None;
                } else {
                    vertical(self, line - 1);
                }
            }
            Movement::Down => {
                if line + 1 >= line_starts.len() {
                    self.place_cursor(len);
                    self.preferred_column = None;
                } else {
                    vertical(self, line + 1);
                }
            }
            Movement::PageUp(rows) => {
                vertical(self, line.saturating_sub(rows.max(1)));
            }
            Movement::PageDown(rows) => {
                let target = (line + rows.max(1)).min(line_starts.len() - 1);
                vertical(self, target);
            }
            Movement::LineStart => {
                self.place_cursor(line_starts[line]);
                self.preferred_column = None;
            }
            Movement::LineEnd => {
                self.place_cursor(line_end(line));
                self.preferred_column = None;
            }
            Movement::BufferStart => {
                self.place_cursor(0);
                self.preferred_column = None;
            }
            Movement::BufferEnd => {
                self.place_cursor(len);
                self.preferred_column = None;
            }
        }

        self.drop_empty_selection();
    }

    /// 原子的変更を適用する（選択は解除される）
    pub fn apply(&mut self, edit: &AtomicEdit) -> Result<()> {
        self.anchor = None;
        self.preferred_column = None;
        match edit {
            AtomicEdit::Insert { position, text } => {
                self.buffer.insert_str(*position, text)?;
                self.place_cursor(position + text.chars().count());
            }
            AtomicEdit::Delete { position, text } => {
                let end = position + text.chars().count();
                let removed = self.buffer.delete_range(*position, end)?;
                debug_assert_eq!(&removed, text);
                self.place_cursor(*position);
            }
        }
        Ok(())
    }

    fn update_anchor(&mut self, extend_selection: bool) {
        if extend_selection {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor.char_pos);
            }
        } else {
            self.anchor = None;
        }
    }

    fn drop_empty_selection(&mut self) {
        if self.anchor == Some(self.cursor.char_pos) {
            self.anchor = None;
        }
    }

    fn place_cursor(&mut self, char_pos: usize) {
        let clamped = char_pos.min(self.buffer.len_chars());
        let line_starts = self.buffer.line_start_positions();
        self.cursor = CursorPosition::from_char_pos(clamped, &line_starts);
    }

    /// 入力可能な文字か（制御文字はタブのみ許可）
    fn is_valid_input_char(ch: char) -> bool {
        !ch.is_control() || ch == '\t'
    }

    fn insert_at_cursor(&mut self, text: &str) -> Result<Vec<AtomicEdit>> {
        let mut edits = self.delete_selection()?;
        if text.is_empty() {
            return Ok(edits);
        }
        let edit = AtomicEdit::Insert {
            position: self.cursor.char_pos,
            text: text.to_string(),
        };
        self.apply(&edit)?;
        edits.push(edit);
        Ok(edits)
    }
}

impl EditOperations for TextEditor {
    fn insert_char(&mut self, ch: char) -> Result<Vec<AtomicEdit>> {
        if ch == '\n' {
            return self.insert_newline();
        }
        if !Self::is_valid_input_char(ch) {
            return Err(EditError::InvalidChar(ch).into());
        }
        let mut buf = [0; 4];
        self.insert_at_cursor(ch.encode_utf8(&mut buf))
    }

    fn insert_str(&mut self, s: &str) -> Result<Vec<AtomicEdit>> {
        let normalized = normalize_line_endings(s);
        self.insert_at_cursor(&normalized)
    }

    fn insert_newline(&mut self) -> Result<Vec<AtomicEdit>> {
        self.insert_at_cursor("\n")
    }

    fn delete_backward(&mut self) -> Result<Vec<AtomicEdit>> {
        if self.selection().is_some() {
            return self.delete_selection();
        }
        let pos = self.cursor.char_pos;
        if pos == 0 {
            return Err(EditError::AtBufferStart.into());
        }
        let text = self.buffer.substring(pos - 1, pos)?;
        let edit = AtomicEdit::Delete {
            position: pos - 1,
            text,
        };
        self.apply(&edit)?;
        Ok(vec![edit])
    }

    fn delete_forward(&mut self) -> Result<Vec<AtomicEdit>> {
        if self.selection().is_some() {
            return self.delete_selection();
        }
        let pos = self.cursor.char_pos;
        if pos >= self.buffer.len_chars() {
            return Err(EditError::AtBufferEnd.into());
        }
        let text = self.buffer.substring(pos, pos + 1)?;
        let edit = AtomicEdit::Delete {
            position: pos,
            text,
        };
        self.apply(&edit)?;
        Ok(vec![edit])
    }

    fn delete_selection(&mut self) -> Result<Vec<AtomicEdit>> {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return Ok(Vec::new());
        };
        let text = self.buffer.substring(start, end)?;
        let edit = AtomicEdit::Delete {
            position: start,
            text,
        };
        self.apply(&edit)?;
        Ok(vec![edit])
    }
}

/// 改行コードをLFに統一
pub fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}
