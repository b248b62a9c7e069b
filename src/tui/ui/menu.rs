use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

const BANNER: &str = r#"
  _                    _
 | | ___   _ ___  ___ | | ___   _ _ __ __ _  ___
 | |/ / | | / __|/ _ \| |/ / | | | '__/ _` |/ _ \
 |   <| |_| \__ \ (_) |   <| |_| | | | (_| |  __/
 |_|\_\\__,_|___/\___/|_|\_\\__,_|_|  \__,_|\___|
"#;

pub(super) fn draw_menu(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 70, f.area());
    let block = Block::default().title("kusokurae").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let banner: Vec<Line> = BANNER
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Yellow))))
        .collect();
    let [banner_area, cfg_area] =
        Layout::vertical([Constraint::Length(banner.len() as u16 + 1), Constraint::Min(3)])
            .areas(inner(area));
    f.render_widget(Paragraph::new(banner).alignment(Alignment::Center), banner_area);

    let mut lines = vec![Line::from(Span::styled(
        "New game:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, item) in app.menu_items_display().into_iter().enumerate() {
        let style = if i == app.menu_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(item, style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Apply  [Q] Quit  [Esc] Cancel  [Up/Down] Move  [+/-] Adjust",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true }).alignment(Alignment::Center);
    f.render_widget(para, cfg_area);
}
