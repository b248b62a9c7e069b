use crossterm::event::KeyCode;
use kusokurae::game::GameStatus;
use kusokurae::tui::app::{AppState, InputAction, Scene};
use kusokurae::tui::controller::handle_key;

fn setup_table_app() -> AppState {
    let mut app = AppState::new(3, 11).unwrap();
    app.apply_menu();
    app
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::new(3, 11).unwrap();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
}

#[test]
fn menu_player_count_stays_in_range() {
    let mut app = AppState::new(3, 11).unwrap();
    for _ in 0..5 {
        let _ = app.handle_input(InputAction::MenuInc);
    }
    assert_eq!(app.cfg_num_players, 4);
    for _ in 0..5 {
        let _ = app.handle_input(InputAction::MenuDec);
    }
    assert_eq!(app.cfg_num_players, 3);

    let _ = app.handle_input(InputAction::MenuInc);
    let _ = app.handle_input(InputAction::MenuApply);
    assert_eq!(app.game.num_players(), 4);
    assert_eq!(app.game.status(), GameStatus::Init);
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn selection_wraps_across_the_hand() {
    let mut app = setup_table_app();
    let _ = app.handle_input(InputAction::Deal);
    let n = app.game.active_player().unwrap().hand_len();
    assert_eq!(n, 11);
    let _ = app.handle_input(InputAction::SelectPrev);
    assert_eq!(app.selected, n - 1);
    let _ = app.handle_input(InputAction::SelectNext);
    assert_eq!(app.selected, 0);
    let _ = app.handle_input(InputAction::SelectCard(n));
    assert_eq!(app.selected, 0);
}

#[test]
fn keys_drive_a_game_to_the_end() {
    let mut app = setup_table_app();
    assert!(!handle_key(&mut app, KeyCode::Char(' ')));
    assert_eq!(app.game.status(), GameStatus::Play);
    for _ in 0..33 {
        assert!(!handle_key(&mut app, KeyCode::Char('a')));
    }
    assert_eq!(app.game.status(), GameStatus::Finish);
    assert!(!app.game.winners().is_empty());
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}
