use holdem_engine::cards::Card;

/// Coarse shape of the community cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardTexture {
    pub paired: bool,
    /// Three or more cards of one suit: a flush is possible.
    pub suited: bool,
    /// Exactly two of one suit.
    pub two_tone: bool,
    /// Three distinct ranks fit in a five-rank window: a straight is possible.
    pub connected: bool,
    pub high_rank: u8,
}

impl BoardTexture {
    pub fn analyze(board: &[Card]) -> Self {
        if board.is_empty() {
            return Self::default();
        }
        let mut suits = [0u8; 4];
        let mut counts = [0u8; 15];
        let mut mask = 0u16;
        for c in board {
            suits[c.suit.index()] += 1;
            let r = c.rank.value();
            counts[r as usize] += 1;
            mask |= 1 << r;
        }
        if mask & (1 << 14) != 0 {
            mask |= 1 << 1;
        }
        let max_suit = suits.iter().copied().max().unwrap_or(0);
        let connected = (1..=10u16).any(|low| (mask & (0b11111 << low)).count_ones() >= 3);
        Self {
            paired: counts.iter().any(|&n| n >= 2),
            suited: max_suit >= 3,
            two_tone: max_suit == 2,
            connected,
            high_rank: board.iter().map(|c| c.rank.value()).max().unwrap_or(0),
        }
    }

    /// Draw-heavy: suited or connected, and not paired.
    pub fn is_wet(&self) -> bool {
        (self.suited || self.connected) && !self.paired
    }

    pub fn is_dry(&self) -> bool {
        !self.is_wet()
    }

    pub fn label(&self) -> &'static str {
        if self.is_wet() { "wet" } else { "dry" }
    }
}
