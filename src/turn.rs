use crate::game::Player;

/// Where a seat stands in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatStatus {
    Waiting,
    Active,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    RoundComplete,
}

/// Tracks the single active seat and moves the turn around the table.
///
/// Seats are 0-based here. At most one seat is `Active` at a time; seats
/// without cards are never activated.
#[derive(Debug, Clone, Default)]
pub struct TurnSequencer {
    active: Option<usize>,
}

impl TurnSequencer {
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Open a round led by `leader`, or by the next seat after it that still
    /// holds cards. Returns the seat that leads, if any.
    pub fn begin_round(&mut self, players: &mut [Player], leader: usize) -> Option<usize> {
        for p in players.iter_mut() {
            p.status =
                if p.hand_len() > 0 { SeatStatus::Waiting } else { SeatStatus::Done };
        }
        let n = players.len();
        let seat = (0..n).map(|k| (leader + k) % n).find(|&i| players[i].hand_len() > 0);
        if let Some(i) = seat {
            players[i].status = SeatStatus::Active;
        }
        self.active = seat;
        seat
    }

    /// Close the active seat's turn and hand it to the next waiting seat in
    /// increasing order, wrapping around the table.
    pub fn advance(&mut self, players: &mut [Player]) -> Advance {
        let Some(current) = self.active.take() else {
            return Advance::RoundComplete;
        };
        players[current].status = SeatStatus::Done;
        let n = players.len();
        let next = (1..n).map(|k| (current + k) % n).find(|&i| {
            players[i].status == SeatStatus::Waiting && players[i].hand_len() > 0
        });
        match next {
            Some(i) => {
                players[i].status = SeatStatus::Active;
                self.active = Some(i);
                Advance::Next(i)
            }
            None => Advance::RoundComplete,
        }
    }

    /// Stand every seat down once the game is over.
    pub fn finish(&mut self, players: &mut [Player]) {
        for p in players.iter_mut() {
            p.status = SeatStatus::Done;
        }
        self.active = None;
    }
}
