use crate::cards::{Card, Suit};
use crate::game::{GameStatus, Player};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let [header_area, board_area, seats_area, hand_area, status_area] = Layout::vertical([
        Constraint::Length(4), // header
        Constraint::Length(5), // board
        Constraint::Min(6),    // seats
        Constraint::Length(5), // active hand
        Constraint::Length(4), // status bar
    ])
    .areas(f.area());

    draw_header(f, header_area, app);
    draw_board(f, board_area, app);
    draw_seats(f, seats_area, app);
    draw_hand(f, hand_area, app);
    draw_status(f, status_area, app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let game = &app.game;
    let rs = game.round_state();
    let leader = rs.leader.map(|s| format!("P{}", s + 1)).unwrap_or_else(|| "--".to_string());
    let doubled = if rs.is_doubled { "  [Doubled]" } else { "" };
    let lines = vec![
        Line::from(format!(
            "Round {}{doubled}   On board: {}   Leading: {leader}",
            rs.seq, rs.score_on_board
        )),
        Line::from(format!(
            "Players: {}   Seed: {}   {:?}{}",
            game.num_players(),
            game.config().seed,
            game.status(),
            if game.status() == GameStatus::Play && game.is_final_round() {
                "   Final round"
            } else {
                ""
            }
        )),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().title("kusokurae").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_board(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().title("Board").borders(Borders::ALL);
    let board_inner = inner(area);
    f.render_widget(block, area);

    let slots = app.game.board();
    let leader = app.game.high_ranker();
    let chunks = Layout::horizontal(vec![Constraint::Ratio(1, slots.len().max(1) as u32); slots.len()])
        .split(board_inner);
    for (seat, card) in slots.into_iter().enumerate() {
        let border = (leader == Some(seat)).then_some(Color::Yellow);
        render_card_widget(f, chunks[seat], card, border, Some(format!("P{}", seat + 1)));
    }
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    let players = app.game.players();
    let chunks =
        Layout::horizontal(vec![Constraint::Ratio(1, players.len().max(1) as u32); players.len()])
            .split(area);
    let winners = app.game.winners();
    for (seat, p) in players.iter().enumerate() {
        render_player(f, chunks[seat], app, seat, p, winners.contains(&seat));
    }
}

fn render_player(f: &mut Frame, area: Rect, app: &AppState, seat: usize, p: &Player, won: bool) {
    let finished = app.game.status() == GameStatus::Finish;
    let mut title = format!("P{}", p.index());
    if app.game.active_seat() == Some(seat) {
        title.push_str(" [Act]");
    }
    if finished && app.game.ghost_holder() == Some(seat) {
        title.push_str(" [Ghost]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if finished && won {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if app.game.active_seat() == Some(seat) {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    let lines = vec![
        Line::from(format!("Score: {}", p.score())),
        Line::from(format!("Taken: {}", p.cards_taken())),
        Line::from(format!("In hand: {}", p.hand_len())),
    ];
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn draw_hand(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(player) = app.game.active_player() else {
        let block = Block::default().title("Hand").borders(Borders::ALL);
        f.render_widget(Paragraph::new("No one to act.").block(block), area);
        return;
    };
    let block = Block::default().title(format!("Hand of P{}", player.index())).borders(Borders::ALL);
    let hand_inner = inner(area);
    f.render_widget(block, area);

    let hand = player.hand();
    let playable = app.game.playable_cards();
    let chunks = Layout::horizontal(vec![Constraint::Length(6); hand.len()]).split(hand_inner);
    for (i, card) in hand.iter().enumerate() {
        let border = if i == app.selected {
            Some(Color::Magenta)
        } else if playable.contains(card) {
            None
        } else {
            Some(Color::DarkGray)
        };
        render_card_widget(f, chunks[i], Some(*card), border, None);
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(inner(area));

    let mut info = match app.game.status() {
        _ if !app.game_started => vec![Line::from("Press Space to deal.")],
        GameStatus::Finish => {
            let winners: Vec<String> =
                app.game.winners().iter().map(|s| format!("P{}", s + 1)).collect();
            vec![Line::from(format!(
                "Game over. Winner(s): {}. Space for a new deal.",
                winners.join(", ")
            ))]
        }
        _ => vec![Line::from("Left/Right select • Enter play • A autoplay")],
    };
    if let Some(err) = app.action_error() {
        info.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }
    let keys = vec![Line::from(""), Line::from("? help • H history • M menu • Q quit")];
    f.render_widget(Paragraph::new(info).wrap(Wrap { trim: true }), left);
    f.render_widget(Paragraph::new(keys).alignment(Alignment::Right), right);
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Rounds").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let rounds = app.rounds().recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if rounds.is_empty() {
        lines.push(Line::from("No rounds played yet."));
    }
    for r in rounds {
        let cards: Vec<String> =
            r.moves.iter().map(|m| format!("P{} {}", m.seat + 1, m.card)).collect();
        lines.push(Line::from(format!(
            "R{:<2} P{} {:+}{}  [{}]",
            r.seq,
            r.winner + 1,
            r.score,
            if r.is_doubled { " x2" } else { "" },
            cards.join(", ")
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal / new game"),
        Line::from("- Left / Right, [ / ]: select card"),
        Line::from("- 1-9, 0: select card by position"),
        Line::from("- Enter: play selected card"),
        Line::from("- A: play the first legal card"),
        Line::from("- H: round history"),
        Line::from(""),
        Line::from(Span::styled("Rules:", bold)),
        Line::from("- Follow the first suit played when you can"),
        Line::from("- The Ghost may be played at any time"),
        Line::from("- Highest rank takes the round; ties go to the earlier card"),
        Line::from("- Baozi +1, Youtiao 0, Xiang -1; the Ghost doubles the round"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- + / -: adjust value"),
        Line::from("- Enter: apply, Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Baozi => Style::default().fg(Color::LightYellow),
        Suit::Youtiao => Style::default().fg(Color::White),
        Suit::Xiang => Style::default().fg(Color::Red),
        Suit::Ghost => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

fn render_card_widget(
    f: &mut Frame,
    area: Rect,
    card: Option<Card>,
    border: Option<Color>,
    title: Option<String>,
) {
    let mut block = Block::default().borders(Borders::ALL).title_alignment(Alignment::Center);
    if let Some(t) = title {
        block = block.title(t);
    }
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let content = match card {
        Some(c) => Line::from(Span::styled(c.to_string(), suit_style(c.suit()))),
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center).block(block), area);
}
