//! ビューポート管理
//!
//! テキスト面のスクロール位置。ガターは同じ `top_line` を使って描画するため、
//! 行番号とテキスト行は常に揃う。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// 表示の開始行（折り返し時は表示行単位）
    top_line: usize,
    /// 表示の開始列（表示幅単位）
    left_column: usize,
    /// 表示可能な行数
    height: usize,
    /// 表示可能な列数
    width: usize,
}

impl Viewport {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            top_line: 0,
            left_column: 0,
            height: height.max(1),
            width: width.max(1),
        }
    }

    /// ビューポートの寸法を更新
    pub fn set_dimensions(&mut self, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);
    }

    /// カーソルが画面内に収まるようスクロールする
    ///
    /// `cursor_column` は行頭からの表示幅。戻り値はスクロールが発生したかどうか。
    pub fn ensure_visible(&mut self, cursor_line: usize, cursor_column: usize) -> bool {
        let before = (self.top_line, self.left_column);

        if cursor_line < self.top_line {
            self.top_line = cursor_line;
        } else if cursor_line >= self.top_line + self.height {
            self.top_line = cursor_line + 1 - self.height;
        }

        if cursor_column < self.left_column {
            self.left_column = cursor_column;
        } else if cursor_column >= self.left_column + self.width {
            self.left_column = cursor_column + 1 - self.width;
        }

        before != (self.top_line, self.left_column)
    }

    /// 行数が減った時に開始行を収める
    pub fn clamp_to(&mut self, line_count: usize) {
        let max_top = line_count.saturating_sub(1);
        self.top_line = self.top_line.min(max_top);
    }

    /// 横スクロールを解除（折り返し表示中）
    pub fn reset_horizontal(&mut self) {
        self.left_column = 0;
    }

    /// 先頭へ戻す（New / Open 後）
    pub fn reset(&mut self) {
        self.top_line = 0;
        self.left_column = 0;
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn left_column(&self) -> usize {
        self.left_column
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_visible_scrolls_up() {
        let mut viewport = Viewport::new(10, 80);
        viewport.ensure_visible(25, 0);
        assert_eq!(viewport.top_line(), 16);

        assert!(viewport.ensure_visible(3, 0));
        assert_eq!(viewport.top_line(), 3);
    }

    #[test]
    fn ensure_visible_scrolls_down_to_bottom_row() {
        let mut viewport = Viewport::new(4, 80);
        assert!(viewport.ensure_visible(10, 0));
        assert_eq!(viewport.top_line(), 7);
        assert!(!viewport.ensure_visible(9, 0));
    }

    #[test]
    fn horizontal_scroll_follows_cursor() {
        let mut viewport = Viewport::new(4, 10);
        viewport.ensure_visible(0, 15);
        assert_eq!(viewport.left_column(), 6);
        viewport.ensure_visible(0, 2);
        assert_eq!(viewport.left_column(), 2);
    }

    #[test]
    fn reset_horizontal_keeps_vertical_position() {
        let mut viewport = Viewport::new(4, 10);
        viewport.ensure_visible(20, 30);
        viewport.reset_horizontal();
        assert_eq!(viewport.left_column(), 0);
        assert_eq!(viewport.top_line(), 17);
    }

    #[test]
    fn clamp_after_lines_removed() {
        let mut viewport = Viewport::new(4, 10);
        viewport.ensure_visible(20, 0);
        viewport.clamp_to(3);
        assert_eq!(viewport.top_line(), 2);
    }
}
