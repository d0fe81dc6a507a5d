use std::fmt;

use holdem_engine::snapshot::TableSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionBucket {
    Early,
    Middle,
    Late,
    Button,
    SmallBlind,
    BigBlind,
}

impl PositionBucket {
    /// Buckets `seat` by its distance from the button among seats still in
    /// the game. Blinds and the button are named directly; the remaining
    /// seats split into thirds in acting order.
    pub fn classify(seat: usize, game: &TableSnapshot) -> Self {
        if seat == game.dealer_index {
            return PositionBucket::Button;
        }
        if seat == game.small_blind_index {
            return PositionBucket::SmallBlind;
        }
        if seat == game.big_blind_index {
            return PositionBucket::BigBlind;
        }
        let n = game.players.len();
        // seats after the big blind up to (excluding) the button
        let others: Vec<usize> = (1..n)
            .map(|k| (game.big_blind_index + k) % n)
            .take_while(|&s| s != game.dealer_index)
            .filter(|&s| game.players[s].active)
            .collect();
        let Some(idx) = others.iter().position(|&s| s == seat) else {
            return PositionBucket::Early;
        };
        let rel = (idx + 1) as f64 / others.len() as f64;
        if rel <= 1.0 / 3.0 {
            PositionBucket::Early
        } else if rel <= 2.0 / 3.0 {
            PositionBucket::Middle
        } else {
            PositionBucket::Late
        }
    }

    pub fn is_late(self) -> bool {
        matches!(self, PositionBucket::Late | PositionBucket::Button)
    }

    pub fn is_blind(self) -> bool {
        matches!(self, PositionBucket::SmallBlind | PositionBucket::BigBlind)
    }

    pub fn name(self) -> &'static str {
        match self {
            PositionBucket::Early => "early",
            PositionBucket::Middle => "middle",
            PositionBucket::Late => "late",
            PositionBucket::Button => "button",
            PositionBucket::SmallBlind => "small blind",
            PositionBucket::BigBlind => "big blind",
        }
    }
}

impl fmt::Display for PositionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
