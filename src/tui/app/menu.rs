use crate::rules::{MAX_PLAYERS, MIN_PLAYERS};

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    Seed,
}

const MENU_ITEMS: [MenuItem; 2] = [MenuItem::Players, MenuItem::Seed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::Seed => format!("Seed: {}", app.cfg_seed),
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < MAX_PLAYERS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::Seed => {
                app.cfg_seed = app.cfg_seed.wrapping_add(1);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > MIN_PLAYERS {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::Seed => {
                app.cfg_seed = app.cfg_seed.wrapping_sub(1);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.cfg_num_players = self.game.num_players();
        self.cfg_seed = self.game.config().seed;
        self.scene = super::Scene::Menu;
    }

    /// Replace the game with a fresh, undealt one built from the menu values.
    pub fn apply_menu(&mut self) {
        self.cfg_num_players = self.cfg_num_players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        match Self::fresh_game(self.cfg_num_players, self.cfg_seed, self.rounds()) {
            Ok(game) => self.game = game,
            Err(err) => log::warn!("menu settings rejected: {err}"),
        }
        self.selected = 0;
        self.game_started = false;
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
