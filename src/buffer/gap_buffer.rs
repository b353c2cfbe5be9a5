//! ギャップバッファ実装
//!
//! 編集位置付近に空き領域を保持し、連続した挿入・削除を安価にする

use crate::error::EditError;
use std::fmt;

const DEFAULT_GAP_CAPACITY: usize = 4096;
const MIN_GAP_RESERVE: usize = 1024;
const GAP_GROWTH_FACTOR: usize = 2;

type BufferResult<T> = std::result::Result<T, EditError>;

/// ギャップバッファ構造体
///
/// 位置指定はすべて文字単位（`char` 数）。内部はUTF-8バイト列で保持し、
/// ギャップは常に文字境界に置かれる。
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// 内部バッファ
    buffer: Vec<u8>,
    /// ギャップの開始位置（バイト）
    gap_start: usize,
    /// ギャップの終了位置（排他的、バイト）
    gap_end: usize,
}

impl GapBuffer {
    /// 空のギャップバッファを作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_GAP_CAPACITY)
    }

    /// 指定容量で作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            gap_start: 0,
            gap_end: capacity,
        }
    }

    /// 文字列から作成（ギャップは末尾）
    pub fn from_str(s: &str) -> Self {
        let bytes = s.as_bytes();
        let gap_size = (bytes.len().max(DEFAULT_GAP_CAPACITY) / 4).max(MIN_GAP_RESERVE);
        let mut buffer = Vec::with_capacity(bytes.len() + gap_size);
        buffer.extend_from_slice(bytes);
        buffer.resize(bytes.len() + gap_size, 0);

        Self {
            buffer,
            gap_start: bytes.len(),
            gap_end: bytes.len() + gap_size,
        }
    }

    fn prefix_str(&self) -> &str {
        // ギャップは文字境界にのみ移動するため常に有効なUTF-8
        std::str::from_utf8(&self.buffer[..self.gap_start]).unwrap_or_default()
    }

    fn suffix_str(&self) -> &str {
        std::str::from_utf8(&self.buffer[self.gap_end..]).unwrap_or_default()
    }

    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.prefix_str().chars().chain(self.suffix_str().chars())
    }

    /// 現在のギャップサイズ
    pub fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// 文字数
    pub fn len_chars(&self) -> usize {
        self.prefix_str().chars().count() + self.suffix_str().chars().count()
    }

    /// バイト数
    pub fn len_bytes(&self) -> usize {
        self.gap_start + (self.buffer.len() - self.gap_end)
    }

    pub fn is_empty(&self) -> bool {
        self.len_bytes() == 0
    }

    /// 行数（空バッファでも1行）
    pub fn line_count(&self) -> usize {
        let newlines = self.buffer[..self.gap_start]
            .iter()
            .chain(self.buffer[self.gap_end..].iter())
            .filter(|&&b| b == b'\n')
            .count();
        newlines + 1
    }

    /// 各行の開始位置（文字単位）
    pub fn line_start_positions(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (idx, ch) in self.chars().enumerate() {
            if ch == '\n' {
                starts.push(idx + 1);
            }
        }
        starts
    }

    /// 指定範囲のテキストを取得
    pub fn substring(&self, start: usize, end: usize) -> BufferResult<String> {
        if start > end {
            return Err(EditError::OutOfBounds(start));
        }
        if end > self.len_chars() {
            return Err(EditError::OutOfBounds(end));
        }
        Ok(self.chars().skip(start).take(end - start).collect())
    }

    /// 指定位置の文字
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars().nth(pos)
    }

    /// 指定位置に文字を挿入
    pub fn insert(&mut self, pos: usize, ch: char) -> BufferResult<()> {
        let mut buf = [0; 4];
        self.insert_str(pos, ch.encode_utf8(&mut buf))
    }

    /// 指定位置に文字列を挿入
    pub fn insert_str(&mut self, pos: usize, s: &str) -> BufferResult<()> {
        let byte_pos = self.char_to_byte_pos(pos)?;
        self.move_gap_to(byte_pos);

        let bytes = s.as_bytes();
        if self.gap_size() < bytes.len() {
            self.grow_gap(bytes.len());
        }

        self.buffer[self.gap_start..self.gap_start + bytes.len()].copy_from_slice(bytes);
        self.gap_start += bytes.len();
        Ok(())
    }

    /// 指定範囲を削除し、削除した文字列を返す
    pub fn delete_range(&mut self, start: usize, end: usize) -> BufferResult<String> {
        let deleted = self.substring(start, end)?;
        if deleted.is_empty() {
            return Ok(deleted);
        }

        let start_byte = self.char_to_byte_pos(start)?;
        let end_byte = start_byte + deleted.len();
        self.move_gap_to(end_byte);
        self.gap_start = start_byte;
        Ok(deleted)
    }

    /// 内容全体を置き換える
    pub fn replace_all(&mut self, text: &str) {
        *self = Self::from_str(text);
    }

    /// 文字位置をバイト位置に変換
    fn char_to_byte_pos(&self, char_pos: usize) -> BufferResult<usize> {
        let prefix = self.prefix_str();
        let mut remaining = char_pos;

        for (byte_idx, _) in prefix.char_indices() {
            if remaining == 0 {
                return Ok(byte_idx);
            }
            remaining -= 1;
        }
        if remaining == 0 {
            return Ok(prefix.len());
        }

        let suffix = self.suffix_str();
        for (byte_idx, _) in suffix.char_indices() {
            if remaining == 0 {
                return Ok(prefix.len() + byte_idx);
            }
            remaining -= 1;
        }
        if remaining == 0 {
            return Ok(prefix.len() + suffix.len());
        }

        Err(EditError::OutOfBounds(char_pos))
    }

    /// ギャップを論理バイト位置へ移動
    fn move_gap_to(&mut self, pos: usize) {
        if pos < self.gap_start {
            let move_size = self.gap_start - pos;
            let new_gap_end = self.gap_end - move_size;
            self.buffer.copy_within(pos..self.gap_start, new_gap_end);
            self.gap_start = pos;
            self.gap_end = new_gap_end;
        } else if pos > self.gap_start {
            let move_size = pos - self.gap_start;
            self.buffer
                .copy_within(self.gap_end..self.gap_end + move_size, self.gap_start);
            self.gap_start += move_size;
            self.gap_end += move_size;
        }
    }

    /// ギャップを拡張
    fn grow_gap(&mut self, min_additional: usize) {
        let current_gap = self.gap_size();
        let new_gap_size = current_gap
            .max(MIN_GAP_RESERVE)
            .saturating_mul(GAP_GROWTH_FACTOR)
            .max(min_additional + MIN_GAP_RESERVE);

        let mut new_buffer = Vec::with_capacity(self.len_bytes() + new_gap_size);
        new_buffer.extend_from_slice(&self.buffer[..self.gap_start]);
        new_buffer.resize(self.gap_start + new_gap_size, 0);
        new_buffer.extend_from_slice(&self.buffer[self.gap_end..]);

        self.buffer = new_buffer;
        self.gap_end = self.gap_start + new_gap_size;
    }
}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix_str())?;
        f.write_str(self.suffix_str())
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gap_buffer() {
        let gap_buffer = GapBuffer::new();
        assert_eq!(gap_buffer.len_chars(), 0);
        assert_eq!(gap_buffer.to_string(), "");
        assert_eq!(gap_buffer.line_count(), 1);
    }

    #[test]
    fn test_insert_middle() {
        let mut gap_buffer = GapBuffer::from_str("abcd");
        gap_buffer.insert(2, 'X').unwrap();
        assert_eq!(gap_buffer.to_string(), "abXcd");
        gap_buffer.insert(0, '<').unwrap();
        gap_buffer.insert(6, '>').unwrap();
        assert_eq!(gap_buffer.to_string(), "<abXcd>");
    }

    #[test]
    fn test_delete_range() {
        let mut gap_buffer = GapBuffer::from_str("abcdef");
        let deleted = gap_buffer.delete_range(1, 4).unwrap();
        assert_eq!(deleted, "bcd");
        assert_eq!(gap_buffer.to_string(), "aef");
    }

    #[test]
    fn test_out_of_bounds() {
        let mut gap_buffer = GapBuffer::from_str("abc");
        assert_eq!(gap_buffer.insert(4, 'x'), Err(EditError::OutOfBounds(4)));
        assert!(gap_buffer.delete_range(2, 5).is_err());
    }

    #[test]
    fn test_line_queries() {
        let gap_buffer = GapBuffer::from_str("line1\nline2\nline3");
        assert_eq!(gap_buffer.line_count(), 3);
        assert_eq!(gap_buffer.line_start_positions(), vec![0, 6, 12]);

        let trailing = GapBuffer::from_str("a\n");
        assert_eq!(trailing.line_count(), 2);
        assert_eq!(trailing.line_start_positions(), vec![0, 2]);
    }

    #[test]
    fn test_utf8_support() {
        let mut gap_buffer = GapBuffer::new();
        gap_buffer.insert_str(0, "こんにちは").unwrap();
        gap_buffer.insert(2, '!').unwrap();
        assert_eq!(gap_buffer.to_string(), "こん!にちは");
        assert_eq!(gap_buffer.len_chars(), 6);
        assert_eq!(gap_buffer.char_at(2), Some('!'));
    }

    #[test]
    fn test_growth_beyond_initial_gap() {
        let mut gap_buffer = GapBuffer::with_capacity(4);
        let long = "x".repeat(5000);
        gap_buffer.insert_str(0, &long).unwrap();
        gap_buffer.insert_str(2500, "\n").unwrap();
        assert_eq!(gap_buffer.len_chars(), 5001);
        assert_eq!(gap_buffer.line_count(), 2);
    }
}
