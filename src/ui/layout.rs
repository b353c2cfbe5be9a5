//! TUIレイアウト管理
//!
//! タイトルバー・メニューバー・本体（ガター/テキスト/スクロールバー）・ステータスライン

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 描画に必要な最小サイズ
pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 6;

/// 画面全体のレイアウト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub title_bar: Rect,
    pub menu_bar: Rect,
    pub gutter: Rect,
    pub text: Rect,
    pub scrollbar: Rect,
    pub status_line: Rect,
}

impl AppLayout {
    /// 画面サイズとガター幅から領域を計算する。小さすぎる場合は `None`
    pub fn compute(area: Rect, gutter_width: u16) -> Option<Self> {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            return None;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        // テキスト面が最低でも数列残るようにガターを制限する
        let gutter_width = gutter_width.min(area.width / 2);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(gutter_width),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(rows[2]);

        Some(Self {
            title_bar: rows[0],
            menu_bar: rows[1],
            gutter: body[0],
            text: body[1],
            scrollbar: body[2],
            status_line: rows[3],
        })
    }
}

/// `area` の中央に `width` x `height` の領域を取る
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
