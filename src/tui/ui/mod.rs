mod layout;
mod menu;
mod table;

use crate::tui::app::{AppState, Scene};
use ratatui::prelude::Frame;

pub fn draw(f: &mut Frame, app: &AppState) {
    match app.scene {
        Scene::Menu => menu::draw_menu(f, app),
        Scene::Table => table::draw_table(f, app),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::InputAction;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn table_shows_board_and_history() {
        let mut app = AppState::new(4, 3).unwrap();
        assert!(rendered(&app).contains("New game:"));

        app.apply_menu();
        app.deal();
        assert!(rendered(&app).contains("Hand of P1"));

        for _ in 0..4 {
            assert!(app.handle_input(InputAction::Autoplay));
        }
        let _ = app.handle_input(InputAction::ToggleHistory);
        assert!(rendered(&app).contains("R1"));
    }
}
