//! Clickable UI building blocks.
//!
//! Each widget draws itself and registers its own click targets in the same
//! call, so a button can never be drawn on a row different from the one it
//! answers to.
//!
//! - [`TabBar`]: one-row tab strip.
//! - [`ClickableList`]: lines of text, some of which are buttons.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Tabs drawn on a single row, separated by `separator`.
///
/// Target widths are measured from the rendered labels, so full-width
/// (CJK) characters and counters inside labels line up with the taps.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("バケツ", style(Tab::Inventory), TAB_INVENTORY)
///     .tab("道具屋", style(Tab::Upgrades), TAB_UPGRADES)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// `(label_width, action_id)` per tab, as laid out by [`render`](Self::render).
    fn measured(&self) -> Vec<(u16, u16)> {
        self.tabs
            .iter()
            .map(|(label, _, id)| (Line::from(format!(" {} ", label)).width() as u16, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let widths = self.measured();
        let sep_width = Line::from(self.separator).width() as u16;
        let sep_style = Style::default().fg(Color::DarkGray);

        let mut spans: Vec<Span> = Vec::with_capacity(self.tabs.len() * 2);
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, sep_style));
            }
            spans.push(Span::styled(format!(" {} ", label), *style));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);

        // Full height keeps the whole bar tappable on touch screens.
        cs.register_tab_targets(
            &widths,
            sep_width,
            area.x,
            area.y,
            area.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a [`Paragraph`], with some lines bound to action IDs.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("所持金 12.50 G"));
/// cl.push_clickable(Line::from(" [C] 釣る"), CATCH);
/// cl.register_targets(area, &mut cs, 1, 1, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// The action follows the line wherever it ends up.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Rows the lines take once wrapped to `width`, as ratatui lays them out.
    pub fn visual_height(&self, width: u16) -> u16 {
        if width == 0 {
            return self.lines.len() as u16;
        }
        Paragraph::new(self.lines.clone())
            .wrap(ratzilla::ratatui::widgets::Wrap { trim: false })
            .line_count(width) as u16
    }

    /// Register a target for every visible row of every clickable line.
    ///
    /// `top_offset`/`bottom_offset` are the rows taken by borders, `scroll` is
    /// in visual rows. With `inner_width == 0` each line is one row; otherwise
    /// lines wider than `inner_width` wrap onto extra rows.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let first_row = area.y + top_offset;
        let end_row = area.y + area.height.saturating_sub(bottom_offset);

        let rows_of = |line: &Line| -> u16 {
            let w = line.width();
            if inner_width == 0 || w <= inner_width as usize {
                1
            } else {
                w.div_ceil(inner_width as usize) as u16
            }
        };

        // Visual row where each logical line starts.
        let mut starts = Vec::with_capacity(self.lines.len());
        let mut acc = 0u16;
        for line in &self.lines {
            starts.push(acc);
            acc += rows_of(line);
        }

        for &(idx, action_id) in &self.actions {
            let Some(&start) = starts.get(idx) else {
                continue;
            };
            for vr in start..start + rows_of(&self.lines[idx]) {
                if vr < scroll {
                    continue;
                }
                let row = first_row + (vr - scroll);
                if row >= end_row {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
