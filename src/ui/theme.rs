//! テーマ
//!
//! ライト/ダークの2種類の固定配色。テキスト面とガターに適用する。

use ratatui::style::{Color, Modifier, Style};

/// 前景色と背景色の組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub foreground: Color,
    pub background: Color,
}

impl ColorPair {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }

    pub fn to_style(self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }
}

const WHITE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
const BLACK: Color = Color::Rgb(0x00, 0x00, 0x00);
const DARK_GRAY: Color = Color::Rgb(0x2E, 0x2E, 0x2E);
const LIGHT_GRAY: Color = Color::Rgb(0xF0, 0xF0, 0xF0);

/// ライトモードのテキスト面
pub const LIGHT_TEXT: ColorPair = ColorPair::new(BLACK, WHITE);
/// ライトモードのガター
pub const LIGHT_GUTTER: ColorPair = ColorPair::new(BLACK, LIGHT_GRAY);
/// ダークモード（テキスト面・ガター共通）
pub const DARK: ColorPair = ColorPair::new(WHITE, DARK_GRAY);

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    TextArea,
    LineNumber,
    Selection,
    TitleBar,
    MenuBar,
    MenuSelected,
    StatusLine,
    Dialog,
    DialogSelected,
    Error,
}

/// 表示テーマ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    dark_mode: bool,
}

impl Theme {
    /// 起動時はライトモード
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark(&self) -> bool {
        self.dark_mode
    }

    /// ダークモードを切り替え、切り替え後の状態を返す
    pub fn toggle(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// テキスト面の配色
    pub fn text_colors(&self) -> ColorPair {
        if self.dark_mode {
            DARK
        } else {
            LIGHT_TEXT
        }
    }

    /// ガターの配色
    pub fn gutter_colors(&self) -> ColorPair {
        if self.dark_mode {
            DARK
        } else {
            LIGHT_GUTTER
        }
    }

    /// コンポーネントのスタイル
    pub fn style(&self, component: ComponentType) -> Style {
        let text = self.text_colors();
        let chrome = if self.dark_mode {
            ColorPair::new(WHITE, Color::Rgb(0x3C, 0x3C, 0x3C))
        } else {
            ColorPair::new(BLACK, Color::Rgb(0xDC, 0xDC, 0xDC))
        };

        match component {
            ComponentType::TextArea => text.to_style(),
            ComponentType::LineNumber => self.gutter_colors().to_style(),
            ComponentType::Selection => Style::default()
                .fg(text.background)
                .bg(text.foreground),
            ComponentType::TitleBar => chrome.to_style().add_modifier(Modifier::BOLD),
            ComponentType::MenuBar | ComponentType::StatusLine => chrome.to_style(),
            ComponentType::MenuSelected | ComponentType::DialogSelected => Style::default()
                .fg(WHITE)
                .bg(Color::Rgb(0x00, 0x5A, 0x9E)),
            ComponentType::Dialog => text.to_style(),
            ComponentType::Error => text.to_style().fg(Color::Rgb(0xC4, 0x2B, 0x1C)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_light_mode() {
        let theme = Theme::new();
        assert!(!theme.is_dark());
        assert_eq!(theme.text_colors(), LIGHT_TEXT);
        assert_eq!(theme.gutter_colors(), LIGHT_GUTTER);
    }

    #[test]
    fn dark_mode_applies_same_pair_to_both_surfaces() {
        let mut theme = Theme::new();
        assert!(theme.toggle());
        assert_eq!(theme.text_colors(), DARK);
        assert_eq!(theme.gutter_colors(), DARK);
        assert_eq!(DARK.background, Color::Rgb(0x2E, 0x2E, 0x2E));
    }

    #[test]
    fn double_toggle_restores_original_colors() {
        let mut theme = Theme::new();
        let text = theme.text_colors();
        let gutter = theme.gutter_colors();
        theme.toggle();
        theme.toggle();
        assert_eq!(theme.text_colors(), text);
        assert_eq!(theme.gutter_colors(), gutter);
    }
}
