//! Input plumbing shared by every game: normalized events, click targets and
//! pixel → cell conversion.
//!
//! Nothing here knows about a particular game. Games register targets while
//! rendering and receive the matching action ID back as `InputEvent::Click`.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press.
    Key(char),
    /// A tap/click that landed on a registered target.
    Click(u16),
}

/// A tappable region in terminal cells.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame, plus the terminal size they were
/// laid out for. Shared between the draw loop and the mouse handler.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register the whole width of `area` at `row`. Rows outside `area` are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row < area.y || row >= area.y + area.height {
            return;
        }
        self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
    }

    /// Register one target per tab of a single-row tab bar.
    ///
    /// `tabs` holds `(label_width, action_id)` in display order and labels are
    /// separated by `separator_width` columns. Each separator is split between
    /// its neighbours; the first tab reaches the left edge and the last tab the
    /// right edge, so the whole bar is tappable.
    pub fn register_tab_targets(
        &mut self,
        tabs: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if tabs.is_empty() || total_width == 0 {
            return;
        }

        // Column where each label ends, relative to `x`.
        let mut ends = Vec::with_capacity(tabs.len());
        let mut col = 0u16;
        for (i, &(width, _)) in tabs.iter().enumerate() {
            if i > 0 {
                col += separator_width;
            }
            col += width;
            ends.push(col);
        }

        let half_sep = separator_width / 2;
        let mut left = 0u16;
        for (i, &(_, action_id)) in tabs.iter().enumerate() {
            let right = if i + 1 == tabs.len() {
                total_width
            } else {
                (ends[i] + half_sep).min(total_width)
            };
            if right > left {
                self.add_click_target(Rect::new(x + left, y, right - left, height), action_id);
            }
            left = right;
        }
    }

    /// Action ID at a cell. Later registrations sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }
}

/// Screens narrower than this stack panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset along one axis to a cell index, or `None` when it falls
/// outside the grid.
fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

/// `click_y` is relative to the top of the grid container.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// `click_x` is relative to the left edge of the grid container.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}
