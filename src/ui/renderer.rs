//! レンダリングシステム
//!
//! コントローラの状態を1フレームとして描画する。ガターとテキスト面は同じ
//! 表示行の列から描くため、行番号と本文の行は常に一致する。折り返し時は
//! 論理行の先頭の表示行にだけ行番号を出す。

use crate::buffer::TextEditor;
use crate::dialog::{FileDialog, MessageBox, Overlay};
use crate::document::Document;
use crate::error::ErrorLevel;
use crate::gutter::LineGutter;
use crate::ui::layout::{centered_rect, AppLayout};
use crate::ui::menu::MenuBar;
use crate::ui::theme::{ComponentType, Theme};
use crate::ui::viewport::Viewport;
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame, Terminal,
};
use std::io;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// タブの表示幅
pub const TAB_WIDTH: usize = 4;

/// 1フレーム分の描画対象
pub struct RenderView<'a> {
    pub title: &'a str,
    pub document: &'a Document,
    pub editor: &'a TextEditor,
    pub gutter: &'a LineGutter,
    pub theme: &'a Theme,
    /// 単語単位で折り返すか（しない場合は横スクロール）
    pub word_wrap: bool,
    pub menu: &'a MenuBar,
    pub overlay: Option<&'a mut Overlay>,
}

/// 画面上の1行。折り返し時は論理行の一部
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VisualRow {
    /// 論理行番号
    line: usize,
    /// 論理行内の範囲（文字単位）
    start: usize,
    end: usize,
}

impl VisualRow {
    fn is_first(&self) -> bool {
        self.start == 0
    }
}

/// 画面描画
#[derive(Debug, Default)]
pub struct Renderer {
    viewport: Viewport,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// ページ移動の行数（直前のフレームのテキスト面の高さ）
    pub fn page_lines(&self) -> usize {
        self.viewport.height()
    }

    /// スクロール位置を先頭に戻す
    pub fn reset_scroll(&mut self) {
        self.viewport.reset();
    }

    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>, view: RenderView<'_>) -> io::Result<()> {
        terminal.draw(|frame| self.draw(frame, view))?;
        Ok(())
    }

    /// フレームへ描画する
    pub fn draw(&mut self, frame: &mut Frame<'_>, view: RenderView<'_>) {
        let area = frame.area();
        let Some(layout) = AppLayout::compute(area, view.gutter.width()) else {
            let notice = Paragraph::new("Terminal too small")
                .style(view.theme.style(ComponentType::Error))
                .wrap(Wrap { trim: true });
            frame.render_widget(notice, area);
            return;
        };

        let lines = view.editor.lines();
        let cursor = view.editor.cursor();
        let cursor_line = lines.get(cursor.line).map(String::as_str).unwrap_or("");
        let cursor_column = display_column(cursor_line, cursor.column);

        let text_width = layout.text.width as usize;
        self.viewport.set_dimensions(layout.text.height as usize, text_width);
        let rows = layout_rows(&lines, view.word_wrap.then_some(text_width));
        let cursor_row = rows
            .partition_point(|row| (row.line, row.start) <= (cursor.line, cursor.column))
            .saturating_sub(1);
        let row_column = rows
            .get(cursor_row)
            .map(|row| segment_column(cursor_line, row.start, cursor.column))
            .unwrap_or(0);

        self.viewport.clamp_to(rows.len());
        if view.word_wrap {
            self.viewport.reset_horizontal();
            self.viewport.ensure_visible(cursor_row, 0);
        } else {
            self.viewport.ensure_visible(cursor_row, row_column);
        }

        self.render_title_bar(frame, layout.title_bar, &view);
        self.render_menu_bar(frame, layout.menu_bar, &view);
        self.render_gutter(frame, layout.gutter, &view, &rows);
        self.render_text(frame, layout.text, &view, &lines, &rows);
        self.render_scrollbar(frame, layout.scrollbar, &view, rows.len());
        self.render_status_line(frame, layout.status_line, &view, cursor_column);

        if view.menu.is_open() {
            render_menu_dropdown(frame, area, layout.menu_bar, view.menu, view.theme);
        }

        match view.overlay {
            Some(Overlay::File(dialog)) => render_file_dialog(frame, area, dialog, view.theme),
            Some(Overlay::Message(message)) => render_message(frame, area, message, view.theme),
            None if !view.menu.is_open() => {
                let x = row_column
                    .saturating_sub(self.viewport.left_column())
                    .min(text_width.saturating_sub(1));
                let y = cursor_row.saturating_sub(self.viewport.top_line());
                frame.set_cursor_position(Position::new(
                    layout.text.x + x as u16,
                    layout.text.y + y as u16,
                ));
            }
            None => {}
        }
    }

    fn render_title_bar(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let title = if view.document.is_modified() {
            format!("*{}", view.title)
        } else {
            view.title.to_string()
        };
        let title = Paragraph::new(Line::from(title).centered())
            .style(view.theme.style(ComponentType::TitleBar));
        frame.render_widget(title, area);
    }

    fn render_menu_bar(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>) {
        let base = view.theme.style(ComponentType::MenuBar);
        let selected = view.theme.style(ComponentType::MenuSelected);
        let spans: Vec<Span<'static>> = view
            .menu
            .menus()
            .iter()
            .enumerate()
            .map(|(idx, menu)| {
                let style = if view.menu.open_index() == Some(idx) { selected } else { base };
                Span::styled(format!(" {} ", menu.title), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
    }

    fn render_gutter(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>, rows: &[VisualRow]) {
        let digits = (area.width as usize).saturating_sub(1);
        let labels: Vec<&str> = view.gutter.labels().collect();
        let lines: Vec<Line<'static>> = rows
            .iter()
            .skip(self.viewport.top_line())
            .take(area.height as usize)
            .map(|row| {
                let label = if row.is_first() {
                    labels.get(row.line).copied().unwrap_or("")
                } else {
                    ""
                };
                Line::from(format!("{:>width$} ", label, width = digits))
            })
            .collect();
        let style = view.theme.style(ComponentType::LineNumber);
        frame.render_widget(Paragraph::new(lines).style(style), area);
    }

    fn render_text(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        view: &RenderView<'_>,
        lines: &[String],
        rows: &[VisualRow],
    ) {
        let text_style = view.theme.style(ComponentType::TextArea);
        let selection_style = view.theme.style(ComponentType::Selection);
        let selection = view.editor.selection();
        let left = if view.word_wrap { 0 } else { self.viewport.left_column() };

        let mut line_starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for line in lines {
            line_starts.push(offset);
            offset += line.chars().count() + 1;
        }

        let rendered: Vec<Line<'static>> = rows
            .iter()
            .skip(self.viewport.top_line())
            .take(area.height as usize)
            .map(|row| {
                let segment: String = lines[row.line]
                    .chars()
                    .skip(row.start)
                    .take(row.end - row.start)
                    .collect();
                visible_line(
                    &segment,
                    line_starts[row.line] + row.start,
                    selection,
                    left,
                    area.width as usize,
                    (text_style, selection_style),
                )
            })
            .collect();

        frame.render_widget(Paragraph::new(rendered).style(text_style), area);
    }

    fn render_scrollbar(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>, row_count: usize) {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .track_style(view.theme.style(ComponentType::TextArea))
            .thumb_style(view.theme.style(ComponentType::StatusLine));
        let mut state = ScrollbarState::new(row_count)
            .position(self.viewport.top_line())
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(scrollbar, area, &mut state);
    }

    fn render_status_line(&self, frame: &mut Frame<'_>, area: Rect, view: &RenderView<'_>, column: usize) {
        let cursor = view.editor.cursor();
        let left = format!(
            " {}{}",
            view.document.display_name(),
            if view.document.is_modified() { " [Modified]" } else { "" }
        );
        let right = format!(
            "Ln {}, Col {}  {} ",
            cursor.line + 1,
            column + 1,
            if view.theme.is_dark() { "Dark" } else { "Light" }
        );
        let padding = (area.width as usize).saturating_sub(left.width() + right.width());
        let text = format!("{}{}{}", left, " ".repeat(padding), right);
        let status = Paragraph::new(text).style(view.theme.style(ComponentType::StatusLine));
        frame.render_widget(status, area);
    }
}

/// 文字の表示幅（タブは次のタブ位置まで）
fn char_width(ch: char, column: usize) -> usize {
    if ch == '\t' {
        TAB_WIDTH - column % TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// 行頭から `char_col` 文字目までの表示幅
pub fn display_column(line: &str, char_col: usize) -> usize {
    segment_column(line, 0, char_col)
}

/// `start` 文字目から始まる表示行での `char_col` 文字目の表示幅
fn segment_column(line: &str, start: usize, char_col: usize) -> usize {
    line.chars()
        .skip(start)
        .take(char_col.saturating_sub(start))
        .fold(0, |column, ch| column + char_width(ch, column))
}

/// 論理行を表示行へ展開する。`wrap_width` が `None` なら1論理行1表示行
fn layout_rows(lines: &[String], wrap_width: Option<usize>) -> Vec<VisualRow> {
    let mut rows = Vec::with_capacity(lines.len());
    for (line, text) in lines.iter().enumerate() {
        match wrap_width {
            Some(width) => rows.extend(
                wrap_segments(text, width)
                    .into_iter()
                    .map(|(start, end)| VisualRow { line, start, end }),
            ),
            None => rows.push(VisualRow {
                line,
                start: 0,
                end: text.chars().count(),
            }),
        }
    }
    rows
}

/// 単語単位で折り返した各表示行の (開始, 終了) 文字位置
///
/// 空白の直後で区切る。区切りがなければ幅で切る。行末の空白は次の行へ送らない。
fn wrap_segments(line: &str, width: usize) -> Vec<(usize, usize)> {
    let chars: Vec<char> = line.chars().collect();
    let width = width.max(1);
    let mut segments = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut column = 0;
        let mut end = start;
        let mut last_break = None;
        while end < chars.len() {
            let w = char_width(chars[end], column);
            if column + w > width {
                break;
            }
            column += w;
            end += 1;
            if chars[end - 1].is_whitespace() {
                last_break = Some(end);
            }
        }

        if end < chars.len() {
            if chars[end].is_whitespace() {
                while end < chars.len() && chars[end].is_whitespace() {
                    end += 1;
                }
            } else if let Some(brk) = last_break {
                end = brk;
            } else if end == start {
                // 1文字で幅を超える
                end = start + 1;
            }
        }

        segments.push((start, end));
        start = end;
    }

    if segments.is_empty() {
        segments.push((0, 0));
    }
    segments
}

/// 横スクロールと選択範囲を反映した1行
fn visible_line(
    line: &str,
    line_start: usize,
    selection: Option<(usize, usize)>,
    left: usize,
    width: usize,
    (text_style, selection_style): (Style, Style),
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut segment = String::new();
    let mut segment_selected = false;
    let mut column = 0;

    for (offset, ch) in line.chars().enumerate() {
        let w = char_width(ch, column);
        let start = column;
        column += w;
        if start < left {
            continue;
        }
        if column > left + width {
            break;
        }

        let pos = line_start + offset;
        let selected = selection.is_some_and(|(s, e)| pos >= s && pos < e);
        if selected != segment_selected && !segment.is_empty() {
            let style = if segment_selected { selection_style } else { text_style };
            spans.push(Span::styled(std::mem::take(&mut segment), style));
        }
        segment_selected = selected;
        if ch == '\t' {
            segment.push_str(&" ".repeat(w));
        } else {
            segment.push(ch);
        }
    }

    if !segment.is_empty() {
        let style = if segment_selected { selection_style } else { text_style };
        spans.push(Span::styled(segment, style));
    }
    Line::from(spans)
}

fn render_menu_dropdown(frame: &mut Frame<'_>, area: Rect, menu_bar_area: Rect, menu: &MenuBar, theme: &Theme) {
    let (Some(index), Some(active)) = (menu.open_index(), menu.active()) else {
        return;
    };

    let x: usize = menu.menus().iter().take(index).map(|m| m.title.width() + 2).sum();
    let label_width = active.items.iter().map(|item| item.label.width()).max().unwrap_or(0);
    let accel_width = active.items.iter().map(|item| item.accelerator.width()).max().unwrap_or(0);
    let width = (label_width + accel_width + 5) as u16;
    let height = active.items.len() as u16 + 2;

    let x = (menu_bar_area.x + x as u16).min(area.right().saturating_sub(width));
    let popup = Rect::new(x, menu_bar_area.y + 1, width, height).intersection(area);

    let lines: Vec<Line<'static>> = active
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == menu.selected() {
                theme.style(ComponentType::DialogSelected)
            } else {
                theme.style(ComponentType::Dialog)
            };
            Line::styled(
                format!(
                    " {:<lw$} {:>aw$} ",
                    item.label,
                    item.accelerator,
                    lw = label_width,
                    aw = accel_width
                ),
                style,
            )
        })
        .collect();

    frame.render_widget(Clear, popup);
    let block = Block::bordered().style(theme.style(ComponentType::Dialog));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_file_dialog(frame: &mut Frame<'_>, area: Rect, dialog: &mut FileDialog, theme: &Theme) {
    let popup = centered_rect(area, 60, 18);
    let dialog_style = theme.style(ComponentType::Dialog);
    let block = Block::bordered().title(format!(" {} ", dialog.title())).style(dialog_style);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    if inner.height < 4 {
        return;
    }

    // 1行目: 場所、最後の3行: 入力欄・フィルタ・エラーまたは上書き確認
    let list_rows = inner.height.saturating_sub(4) as usize;
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(inner.height as usize);
    lines.push(Line::from(format!("Look in: {}", dialog.directory().display())));

    let range = dialog.visible_range(list_rows);
    let selected = dialog.selected();
    for idx in range.clone() {
        let entry = &dialog.entries()[idx];
        let style = if selected == Some(idx) {
            theme.style(ComponentType::DialogSelected)
        } else {
            dialog_style
        };
        lines.push(Line::styled(format!("  {}", entry.display_name()), style));
    }
    for _ in range.len()..list_rows {
        lines.push(Line::from(""));
    }

    let input_prefix = "File name: ";
    lines.push(Line::from(format!("{}{}", input_prefix, dialog.input())));
    lines.push(Line::from(format!("Files of type: {}  [Tab]", dialog.filter().display())));
    if let Some(prompt) = dialog.replace_prompt() {
        lines.push(Line::styled(prompt, theme.style(ComponentType::DialogSelected)));
    } else if let Some(error) = dialog.error() {
        lines.push(Line::styled(error.to_string(), theme.style(ComponentType::Error)));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    let input_column = input_prefix.width() + display_column(dialog.input(), dialog.input_cursor());
    let cursor_x = (inner.x as usize + input_column).min(inner.right().saturating_sub(1) as usize);
    frame.set_cursor_position(Position::new(cursor_x as u16, inner.y + 1 + list_rows as u16));
}

fn render_message(frame: &mut Frame<'_>, area: Rect, message: &MessageBox, theme: &Theme) {
    let width = (message.message().width().max(message.title().width()) + 4).clamp(20, 60) as u16;
    let popup = centered_rect(area, width, 6);
    let block = Block::bordered()
        .title(format!(" {} ", message.title()))
        .style(theme.style(ComponentType::Dialog));

    let text_style = match message.level() {
        ErrorLevel::Info => theme.style(ComponentType::Dialog),
        ErrorLevel::Warning | ErrorLevel::Error => theme.style(ComponentType::Error),
    };
    let lines = vec![
        Line::styled(message.message().to_string(), text_style),
        Line::from(""),
        Line::styled("[ OK ]", theme.style(ComponentType::DialogSelected)).centered(),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
