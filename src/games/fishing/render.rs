//! Fishing screen: HUD and pond, tab panels and the message log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::logic::format_gold;
use super::state::StateView;
use super::{FishingGame, Tab};

/// Repeated to fill the pond; shifted by the animation frame.
const WAVE: &str = "~ ~~  ~ ~~~  ~  ";

const TAB_SEPARATOR: &str = " │ ";

/// Line index of the bobber inside the pond panel.
const BOBBER_LINE: u16 = 2;

pub fn render(game: &FishingGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let view = game.state.view();

    let (main_area, side_log) = if area.width >= 80 {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        (h[0], Some(h[1]))
    } else {
        (area, None)
    };

    let narrow = is_narrow_layout(main_area.width);
    let (pond_borders, pond_inner_w) = if narrow {
        (Borders::TOP | Borders::BOTTOM, main_area.width)
    } else {
        (Borders::ALL, main_area.width.saturating_sub(2))
    };
    let pond = pond_lines(game, &view, pond_inner_w);
    let pond_height = (pond.visual_height(pond_inner_w) + 2).min(main_area.height.saturating_sub(4));
    let bottom_log = if side_log.is_none() { 5 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pond_height),
            Constraint::Length(1), // tab bar
            Constraint::Min(3),
            Constraint::Length(bottom_log),
        ])
        .split(main_area);

    render_pond(game, pond, pond_borders, pond_inner_w, f, chunks[0], click_state);
    render_tab_bar(game, narrow, f, chunks[1], click_state);
    match game.tab {
        Tab::Inventory => render_inventory(&view, f, chunks[2]),
        Tab::Upgrades => render_upgrades(game, f, chunks[2], click_state),
        Tab::Market => render_market(game, &view, f, chunks[2]),
    }

    match side_log {
        Some(log_area) => render_log(game, f, log_area),
        None if bottom_log > 0 => render_log(game, f, chunks[3]),
        None => {}
    }
}

/// `width` columns of water starting `shift` characters into the pattern.
fn wave_row(width: usize, shift: usize) -> String {
    WAVE.chars().cycle().skip(shift % WAVE.len()).take(width).collect()
}

/// `filled`/`width` block gauge for `used` out of `max`.
fn gauge(used: usize, max: usize, width: usize) -> (usize, usize) {
    if max == 0 {
        return (0, width);
    }
    let filled = (used * width / max).min(width);
    (filled, width - filled)
}

fn pond_lines(game: &FishingGame, view: &StateView, width: u16) -> ClickableList<'static> {
    let fb = &game.feedback;
    let stats = &game.state.stats;
    let full = view.inventory_len >= view.max_inventory_size;
    let mut cl = ClickableList::new();

    // HUD
    let gold_style = if fb.gold_flash > 0 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let bucket_style = if full {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    cl.push(Line::from(vec![
        Span::styled(format!(" 💰 {} G", format_gold(view.gold)), gold_style),
        Span::styled(
            format!("  🎣×{}", view.fish_per_click),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("  🪣 {}/{}", view.inventory_len, view.max_inventory_size),
            bucket_style,
        ),
    ]));

    // Pond
    let w = width as usize;
    let shift = (fb.anim_frame / 3) as usize;
    let water = Style::default().fg(Color::Blue);
    let (bobber, bobber_style) = if fb.catch_flash > 0 {
        ("✦", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    } else if (fb.anim_frame / 5).is_multiple_of(2) {
        ("○", Style::default().fg(Color::Red))
    } else {
        ("◎", Style::default().fg(Color::Red))
    };
    let left = w.saturating_sub(1) / 2;
    let right = w.saturating_sub(left + 1);
    cl.push_clickable(Line::from(Span::styled(wave_row(w, shift), water)), CATCH);
    cl.push_clickable(
        Line::from(vec![
            Span::styled(wave_row(left, shift + 5), water),
            Span::styled(bobber, bobber_style),
            Span::styled(wave_row(right, shift + 6 + left), water),
        ]),
        CATCH,
    );
    cl.push_clickable(Line::from(Span::styled(wave_row(w, shift + 9), water)), CATCH);

    cl.push(Line::from(Span::styled(
        format!(
            " 👆{}  釣果 {}匹  売却 {}匹  累計 {} G  最高 {} G",
            stats.clicks,
            stats.fish_caught,
            stats.fish_sold,
            format_gold(stats.gold_earned),
            format_gold(stats.best_sale)
        ),
        Style::default().fg(Color::DarkGray),
    )));

    // Buttons
    let catch_style = if fb.catch_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if full {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let catch_label = if view.fish_per_click > 1 {
        format!(" [C] 釣る ×{}", view.fish_per_click)
    } else {
        " [C] 釣る".to_string()
    };
    cl.push_clickable(Line::from(Span::styled(catch_label, catch_style)), CATCH);

    let sell_style = if view.inventory_len == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let sell_label = format!(" [S] 全部売る ({}匹)", view.inventory_len);
    cl.push_clickable(Line::from(Span::styled(sell_label, sell_style)), SELL_ALL);

    if full {
        let blink = (fb.anim_frame / 4).is_multiple_of(2);
        cl.push(Line::from(Span::styled(
            " ⚠ バケツが満杯！ 売ってから釣ろう",
            Style::default()
                .fg(if blink { Color::Red } else { Color::Yellow })
                .add_modifier(Modifier::BOLD),
        )));
    }

    cl
}

fn render_pond(
    game: &FishingGame,
    pond: ClickableList<'static>,
    borders: Borders,
    inner_w: u16,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let fb = &game.feedback;
    let border_color = if fb.gold_flash > 0 {
        Color::Yellow
    } else if fb.catch_flash > 0 {
        Color::White
    } else {
        Color::Blue
    };
    let title = if fb.gold_flash > 0 { " ✦ 釣り堀 ✦ " } else { " 釣り堀 " };

    {
        let mut cs = click_state.borrow_mut();
        pond.register_targets(area, &mut cs, 1, 1, 0, inner_w);
    }

    let widget = Paragraph::new(pond.into_lines())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(borders)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );
    f.render_widget(widget, area);

    render_particles(game, f, area);
}

/// Floating "+N" texts rising from the bobber.
fn render_particles(game: &FishingGame, f: &mut Frame, area: Rect) {
    if area.height < 3 {
        return;
    }
    let top = area.y + 1;
    let bottom = area.y + area.height - 1;
    let bobber_y = (top + BOBBER_LINE).min(bottom.saturating_sub(1));
    let center_x = area.x + area.width / 2;

    for p in &game.feedback.particles {
        let progress = 1.0 - p.life as f32 / p.max_life.max(1) as f32;
        let rise = (progress * 3.0) as u16;
        let y = bobber_y.saturating_sub(rise).max(top);
        let x = (center_x as i16 + p.col_offset).max(area.x as i16 + 1) as u16;

        let color = if p.life > p.max_life * 2 / 3 {
            Color::White
        } else if p.life > p.max_life / 3 {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let right_edge = area.x + area.width.saturating_sub(1);
        if y >= bottom || x >= right_edge {
            continue;
        }
        let text_w = Line::from(p.text.as_str()).width() as u16;
        let w = text_w.min(right_edge - x);
        if w == 0 {
            continue;
        }
        let widget = Paragraph::new(Span::styled(
            p.text.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(widget, Rect::new(x, y, w, 1));
    }
}

fn render_tab_bar(
    game: &FishingGame,
    narrow: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let style = |tab: Tab, color: Color| -> Style {
        if game.tab == tab {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let affordable = game
        .state
        .upgrades
        .iter()
        .filter(|u| game.state.can_afford(u))
        .count();
    let upgrades_color = if affordable > 0 { Color::Yellow } else { Color::Magenta };
    let [inventory_label, upgrades_label, market_label] = tab_labels(narrow, affordable);

    let mut cs = click_state.borrow_mut();
    TabBar::new(TAB_SEPARATOR)
        .tab(inventory_label, style(Tab::Inventory, Color::Cyan), TAB_INVENTORY)
        .tab(upgrades_label, style(Tab::Upgrades, upgrades_color), TAB_UPGRADES)
        .tab(market_label, style(Tab::Market, Color::Green), TAB_MARKET)
        .render(f, area, &mut cs);
}

/// Inventory, Upgrades and Market tab labels. Narrow screens drop the key
/// hints and the counter so all three tabs fit in 30 columns.
fn tab_labels(narrow: bool, affordable: usize) -> [String; 3] {
    if narrow {
        return ["バケツ".into(), "道具屋".into(), "市場".into()];
    }
    let upgrades = if affordable > 0 {
        format!("[U] 道具屋 ({})", affordable)
    } else {
        "[U] 道具屋".to_string()
    };
    ["[I] バケツ".into(), upgrades, "[M] 市場".into()]
}

fn render_inventory(view: &StateView, f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    let gauge_w = (area.width.saturating_sub(18) as usize).clamp(5, 30);
    let (filled, empty) = gauge(view.inventory_len, view.max_inventory_size, gauge_w);
    let gauge_color = if filled == gauge_w { Color::Red } else { Color::Cyan };
    lines.push(Line::from(vec![
        Span::styled(" 容量 ", Style::default().fg(Color::White)),
        Span::styled("█".repeat(filled), Style::default().fg(gauge_color)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {}/{}", view.inventory_len, view.max_inventory_size),
            Style::default().fg(gauge_color).add_modifier(Modifier::BOLD),
        ),
    ]));

    if view.inventory.is_empty() {
        lines.push(Line::from(Span::styled(
            " (バケツは空っぽ)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for entry in &view.inventory {
        let mut spans = vec![
            Span::styled(
                format!(" 🐟 {:<10}", entry.type_name),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("×{:<3}", entry.count),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ];
        if view.has_scale {
            spans.push(Span::styled(
                format!(" 価値 {} G", format_gold(entry.worth)),
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(price) = view.prices.iter().find(|p| p.type_name == entry.type_name) {
            spans.push(Span::styled(
                format!(" 相場 ×{}", format_gold(price.price)),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from(spans));
    }

    if !view.has_scale && !view.inventory.is_empty() {
        lines.push(Line::from(Span::styled(
            " (はかりがあれば価値が分かる)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" バケツ "),
    );
    f.render_widget(widget, area);
}

fn render_upgrades(
    game: &FishingGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = &game.state;
    let mut cl = ClickableList::new();

    for (i, upgrade) in state.upgrades.iter().enumerate() {
        let key = if i < 9 {
            format!("[{}]", i + 1)
        } else {
            "   ".to_string()
        };

        let line = if upgrade.purchased {
            Line::from(vec![
                Span::styled(format!(" {} ✔ ", key), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} 購入済み ({})", upgrade.name, upgrade.effect.summary()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else {
            let can_afford = state.can_afford(upgrade);
            let (key_style, text_style, cost_style) = if can_afford {
                (
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White),
                    Style::default().fg(Color::Green),
                )
            } else {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::Red),
                )
            };
            Line::from(vec![
                Span::styled(format!(" {} ", key), key_style),
                Span::styled(
                    format!("{} - {} [{}] ", upgrade.name, upgrade.description, upgrade.effect.summary()),
                    text_style,
                ),
                Span::styled(format!("{} G", format_gold(upgrade.cost)), cost_style),
            ])
        };
        cl.push_clickable(line, BUY_UPGRADE_BASE + i as u16);
    }

    if cl.is_empty() {
        cl.push(Line::from(Span::styled(
            " (道具屋は品切れ)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    }

    let left = state.available_upgrade_count();
    let title = if left > 0 {
        format!(" 道具屋 [1-9]で購入 (残り{}) ", left)
    } else {
        " 道具屋 (コンプリート!) ".to_string()
    };
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_market(game: &FishingGame, view: &StateView, f: &mut Frame, area: Rect) {
    let config = game.state.market.config();
    let mut lines: Vec<Line> = Vec::new();

    if view.show_prices {
        lines.push(Line::from(Span::styled(
            format!(" {:<10}{:>8}  {:>4}", "魚", "相場", "売却"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        let bar_max = 10usize;
        for p in &view.prices {
            let color = if p.supply == 0 {
                Color::Green
            } else if p.price > config.floor_price {
                Color::Yellow
            } else {
                Color::Red
            };
            let filled = if config.base_price > 0.0 {
                ((p.price / config.base_price) * bar_max as f64).round() as usize
            } else {
                0
            }
            .min(bar_max);
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<10}", p.type_name), Style::default().fg(Color::White)),
                Span::styled(
                    format!("×{:>7}", format_gold(p.price)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {:>4} ", p.supply), Style::default().fg(Color::Cyan)),
                Span::styled("▮".repeat(filled), Style::default().fg(color)),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!(
                " 基準 ×{} / 1匹ごとに -{} / 下限 ×{}",
                format_gold(config.base_price),
                format_gold(config.decay_rate),
                format_gold(config.floor_price)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " 相場ボードを買うと魚ごとの相場が見える",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            " 同じ魚を売るほど値段は下がる (下限あり)",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!(" 市場に出回った魚: {}匹", game.state.market.total_supply()),
            Style::default().fg(Color::Cyan),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" 市場 "),
    );
    f.render_widget(widget, area);
}

fn render_log(game: &FishingGame, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;

    // Newest first.
    let lines: Vec<Line> = game
        .feedback
        .log
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| {
            let recent = i < 3;
            let style = match (entry.is_important, recent) {
                (true, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" ログ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_row_fills_width_and_shifts() {
        assert_eq!(wave_row(20, 0).chars().count(), 20);
        assert_eq!(wave_row(0, 3), "");
        assert_ne!(wave_row(8, 0), wave_row(8, 1));
        assert_eq!(wave_row(8, 0), wave_row(8, WAVE.len()));
    }

    fn tab_bar_width(labels: &[String]) -> usize {
        let sep = Line::from(TAB_SEPARATOR).width();
        let tabs: usize = labels.iter().map(|l| Line::from(format!(" {} ", l)).width()).sum();
        tabs + sep * labels.len().saturating_sub(1)
    }

    #[test]
    fn narrow_tab_bar_fits_thirty_columns() {
        for affordable in [0, 3, 12] {
            let labels = tab_labels(true, affordable);
            assert!(tab_bar_width(&labels) <= 30, "{:?}", labels);
        }
    }

    #[test]
    fn narrow_tab_targets_reach_market_tab() {
        let labels = tab_labels(true, 5);
        let widths: Vec<(u16, u16)> = labels
            .iter()
            .zip([TAB_INVENTORY, TAB_UPGRADES, TAB_MARKET])
            .map(|(l, id)| (Line::from(format!(" {} ", l)).width() as u16, id))
            .collect();
        let mut cs = ClickState::new();
        cs.register_tab_targets(&widths, Line::from(TAB_SEPARATOR).width() as u16, 0, 0, 30, 1);
        let market_start = tab_bar_width(&labels[..2]) as u16 + 2;
        assert_eq!(cs.hit_test(market_start, 0), Some(TAB_MARKET));
    }

    #[test]
    fn wide_tab_labels_keep_key_hints() {
        let labels = tab_labels(false, 2);
        assert!(labels[0].starts_with("[I]"));
        assert!(labels[1].contains("(2)"));
        assert!(labels[2].starts_with("[M]"));
    }

    #[test]
    fn gauge_splits_width() {
        assert_eq!(gauge(0, 10, 10), (0, 10));
        assert_eq!(gauge(5, 10, 10), (5, 5));
        assert_eq!(gauge(10, 10, 10), (10, 0));
        assert_eq!(gauge(3, 0, 6), (0, 6));
        assert_eq!(gauge(1, 3, 5), (1, 4));
    }
}
