//! カーソル位置管理

/// カーソル位置
///
/// `char_pos` が正、`line` / `column` はそこから導出される表示用の値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    /// 文字位置（0ベース）
    pub char_pos: usize,
    /// 行番号（0ベース）
    pub line: usize,
    /// 列番号（0ベース、文字単位）
    pub column: usize,
}

impl CursorPosition {
    /// 原点のカーソル
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(char_pos: usize, line: usize, column: usize) -> Self {
        Self {
            char_pos,
            line,
            column,
        }
    }

    /// 行開始位置の一覧から文字位置に対応するカーソルを作る
    pub fn from_char_pos(char_pos: usize, line_starts: &[usize]) -> Self {
        let line = match line_starts.binary_search(&char_pos) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let column = char_pos - line_starts.get(line).copied().unwrap_or(0);
        Self::at(char_pos, line, column)
    }
}
