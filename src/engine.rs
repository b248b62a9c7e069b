// Minimal game engine API boundary. This trait exposes the kusokurae actions
// and queries so front ends (TUI, headless runner, benches) can drive a game
// without depending on its internals. It is implemented for the core `Game`.

use crate::cards::Card;
use crate::game::{Game, GameError, GameStatus, RoundState};

pub trait KusokuraeEngine {
    // Lifecycle
    fn start(&mut self) -> Result<(), GameError>;

    // Player actions
    fn play(&mut self, card: Card) -> Result<(), GameError>;
    fn autoplay(&mut self) -> Result<(), GameError>;

    // Queries
    fn status(&self) -> GameStatus;
    fn active_seat(&self) -> Option<usize>;
    fn hand(&self, seat: usize) -> Option<Vec<Card>>;
    fn playable_cards(&self) -> Vec<Card>;
    fn round_state(&self) -> RoundState;
    fn is_final_round(&self) -> bool;
    fn score(&self, seat: usize) -> Option<i32>;
    fn num_players(&self) -> usize;
}

impl KusokuraeEngine for Game {
    fn start(&mut self) -> Result<(), GameError> {
        self.start()
    }

    fn play(&mut self, card: Card) -> Result<(), GameError> {
        self.play(card)
    }
    fn autoplay(&mut self) -> Result<(), GameError> {
        self.autoplay()
    }

    fn status(&self) -> GameStatus {
        self.status()
    }
    fn active_seat(&self) -> Option<usize> {
        self.active_seat()
    }
    fn hand(&self, seat: usize) -> Option<Vec<Card>> {
        self.player(seat).map(|p| p.hand())
    }
    fn playable_cards(&self) -> Vec<Card> {
        self.playable_cards()
    }
    fn round_state(&self) -> RoundState {
        self.round_state()
    }
    fn is_final_round(&self) -> bool {
        self.is_final_round()
    }
    fn score(&self, seat: usize) -> Option<i32> {
        self.player(seat).map(|p| p.score())
    }
    fn num_players(&self) -> usize {
        self.num_players()
    }
}

/// Start the game if needed and autoplay it to the end. Returns the number of
/// cards played.
pub fn play_out(engine: &mut dyn KusokuraeEngine) -> Result<usize, GameError> {
    if engine.status() == GameStatus::Init {
        engine.start()?;
    }
    let mut plays = 0;
    while engine.status() == GameStatus::Play {
        engine.autoplay()?;
        plays += 1;
    }
    Ok(plays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn play_out_runs_every_card() {
        for n in [3, 4] {
            let mut game = Game::new(GameConfig::new(n).with_seed(9)).unwrap();
            let plays = play_out(&mut game).unwrap();
            assert_eq!(plays, if n == 3 { 33 } else { 32 });
            let engine: &dyn KusokuraeEngine = &game;
            assert_eq!(engine.status(), GameStatus::Finish);
            assert!(engine.active_seat().is_none());
            assert!((0..n).all(|s| engine.hand(s).is_some_and(|h| h.is_empty())));
            assert!(engine.hand(n).is_none());
        }
    }

    #[test]
    fn play_out_reports_sequencing_errors() {
        let mut game = Game::new(GameConfig::new(3)).unwrap();
        play_out(&mut game).unwrap();
        assert_eq!(play_out(&mut game).unwrap(), 0);
        assert_eq!(
            KusokuraeEngine::play(&mut game, Card::ghost()).unwrap_err(),
            GameError::NotInGame(GameStatus::Finish)
        );
    }
}
