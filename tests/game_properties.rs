use kusokurae::cards::Card;
use kusokurae::deck::Deck;
use kusokurae::game::{Game, GameConfig, GameError, GameObserver, GameStatus, RoundOutcome};
use kusokurae::rules::BASE_SCORE;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Outcomes(Rc<RefCell<Vec<RoundOutcome>>>);

impl GameObserver for Outcomes {
    fn on_status_change(&mut self, _status: GameStatus) {}

    fn on_round_resolved(&mut self, outcome: &RoundOutcome) {
        self.0.borrow_mut().push(outcome.clone());
    }
}

fn any_players() -> impl Strategy<Value = usize> {
    prop_oneof![Just(3usize), Just(4usize)]
}

/// Plays the game to the end, choosing among legal cards with `picks`.
fn play_with(game: &mut Game, picks: &[usize]) {
    let mut i = 0;
    while game.status() == GameStatus::Play {
        let legal = game.playable_cards();
        assert!(!legal.is_empty());
        let pick = picks.get(i).copied().unwrap_or(0) % legal.len();
        game.play(legal[pick]).unwrap();
        i += 1;
    }
}

proptest! {
    #[test]
    fn dealt_cards_are_unique(n in any_players(), seed in any::<u64>()) {
        let mut deck = Deck::for_players(n).unwrap();
        deck.shuffle_seeded(seed);
        let hands = deck.deal(n).unwrap();
        let orders: HashSet<u8> = hands.iter().flatten().map(|c| c.display_order()).collect();
        prop_assert_eq!(orders.len(), if n == 3 { 33 } else { 32 });
        for hand in &hands {
            prop_assert!(hand.windows(2).all(|w| w[0].display_order() > w[1].display_order()));
        }
    }

    #[test]
    fn one_active_seat_and_legal_moves_throughout(
        n in any_players(),
        seed in any::<u64>(),
        picks in proptest::collection::vec(any::<usize>(), 0..40),
    ) {
        let mut game = Game::new(GameConfig::new(n).with_seed(seed)).unwrap();
        game.start().unwrap();
        let dealt = game.players()[0].all_cards().len();
        let mut i = 0;
        while game.status() == GameStatus::Play {
            prop_assert!(game.active_seat().is_some());
            for p in game.players() {
                prop_assert_eq!(p.hand_len() + p.played_count(), dealt);
            }
            let legal = game.playable_cards();
            let hand = game.active_player().unwrap().hand();
            for card in hand.iter().filter(|c| !legal.contains(c)) {
                let before = game.round_state();
                let err = game.play(*card).unwrap_err();
                let is_forbidden = matches!(err, GameError::ForbiddenMove { .. });
                prop_assert!(is_forbidden);
                prop_assert_eq!(game.round_state(), before);
            }
            let pick = picks.get(i).copied().unwrap_or(0) % legal.len();
            let rounds_before = game.finished_rounds();
            game.play(legal[pick]).unwrap();
            if game.status() == GameStatus::Play && game.finished_rounds() > rounds_before {
                let fresh = game.round_state();
                prop_assert!(!fresh.is_doubled);
                prop_assert_eq!(fresh.score_on_board, BASE_SCORE);
                prop_assert_eq!(fresh.leader, None);
                prop_assert!(game.moves().is_empty());
            }
            i += 1;
        }
        prop_assert!(game.active_seat().is_none());
        prop_assert_eq!(i, dealt * n);
    }

    #[test]
    fn foreign_card_changes_nothing(seed in any::<u64>()) {
        let mut game = Game::new(GameConfig::new(3).with_seed(seed)).unwrap();
        game.start().unwrap();
        let seat = game.active_seat().unwrap();
        let other = game.players()[(seat + 1) % 3].hand()[0];
        let snapshot = |g: &Game| -> (Vec<Vec<Card>>, Vec<i32>, GameStatus) {
            (
                g.players().iter().map(|p| p.hand()).collect(),
                g.players().iter().map(|p| p.score()).collect(),
                g.status(),
            )
        };
        let before = snapshot(&game);
        prop_assert_eq!(game.play(other).unwrap_err(), GameError::CardNotFound(other));
        prop_assert_eq!(before, snapshot(&game));
        prop_assert_eq!(game.active_seat(), Some(seat));
        prop_assert!(game.moves().is_empty());
    }

    #[test]
    fn rounds_add_up(
        n in any_players(),
        seed in any::<u64>(),
        picks in proptest::collection::vec(any::<usize>(), 0..40),
    ) {
        let log = Outcomes::default();
        let mut game =
            Game::with_observer(GameConfig::new(n).with_seed(seed), log.clone()).unwrap();
        game.start().unwrap();
        play_with(&mut game, &picks);

        let rounds = log.0.borrow();
        let per_hand = if n == 3 { 11 } else { 8 };
        prop_assert_eq!(rounds.len(), per_hand);
        prop_assert!(rounds.windows(2).all(|w| w[1].seq == w[0].seq + 1));
        prop_assert_eq!(rounds.iter().filter(|r| r.game_over).count(), 1);
        prop_assert!(rounds.last().is_some_and(|r| r.game_over));
        prop_assert_eq!(rounds.iter().filter(|r| r.is_doubled).count(), 1);

        let taken: usize = game.players().iter().map(|p| p.cards_taken()).sum();
        prop_assert_eq!(taken, per_hand * n);
        let scored: i32 = game.players().iter().map(|p| p.score()).sum();
        prop_assert_eq!(scored, rounds.iter().map(|r| r.score).sum::<i32>());

        let winners = game.winners();
        let best = game.players().iter().map(|p| p.score()).max().unwrap();
        prop_assert!(!winners.is_empty());
        prop_assert!(winners.iter().all(|&s| game.players()[s].score() == best));
        let doubled = rounds.iter().find(|r| r.is_doubled).unwrap();
        prop_assert_eq!(game.ghost_holder(), Some(doubled.winner));
    }
}
