//! Misère Nim game state machine.
//!
//! ## Game Rules
//!
//! - Several piles of objects; the canonical layout is `[1, 3, 5, 7]`
//! - Two players alternate turns
//! - A move removes one or more objects from a single pile
//! - **Misère convention**: the player who removes the last object **loses**
//!
//! The misère rule is the opposite of normal-play Nim and determines the
//! sign of the reward signal during training, so it must hold exactly.
//!
//! Legal-move enumeration is exposed as an associated function over a bare
//! pile slice so that the learner can query arbitrary configurations
//! without constructing a full game.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Turn indicator: one of exactly two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The player who moves first.
    One,
    /// The player who moves second.
    Two,
}

impl Player {
    /// The opposing player.
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Stable index in `{0, 1}`, used for per-player bookkeeping slots.
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// A move: remove `count` objects from pile `pile`.
///
/// Legal iff `pile` is in range and `1 <= count <= piles[pile]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Index of the pile to remove from.
    pub pile: usize,
    /// Number of objects removed, at least 1.
    pub count: u32,
}

impl Move {
    /// Create a move removing `count` objects from pile `pile`.
    pub fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile)
    }
}

/// Errors raised by [`Nim::apply`] for moves that violate the rules.
///
/// An illegal move is always surfaced to the caller, never clamped:
/// silently correcting it would corrupt both game fairness and the state
/// transitions the learner observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    /// The game is already over; no further moves are accepted.
    GameOver,
    /// The move names a pile index outside the configuration.
    NoSuchPile {
        /// The offending pile index.
        pile: usize,
        /// Number of piles in the configuration.
        num_piles: usize,
    },
    /// The count is zero or exceeds the pile's current size.
    BadCount {
        /// The pile the move targets.
        pile: usize,
        /// The requested count.
        count: u32,
        /// Objects currently in that pile.
        available: u32,
    },
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMove::GameOver => write!(f, "game is already over"),
            InvalidMove::NoSuchPile { pile, num_piles } => {
                write!(f, "pile {} does not exist ({} piles)", pile, num_piles)
            }
            InvalidMove::BadCount {
                pile,
                count,
                available,
            } => write!(
                f,
                "cannot take {} from pile {} holding {}",
                count, pile, available
            ),
        }
    }
}

impl Error for InvalidMove {}

/// A game of misère Nim, mutated in place turn by turn.
///
/// A `Nim` value lives for one episode: created at the starting layout,
/// advanced by [`apply`](Nim::apply) until terminal, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    piles: Vec<u32>,
    player: Player,
    winner: Option<Player>,
}

impl Default for Nim {
    fn default() -> Self {
        Self::new(&[1, 3, 5, 7])
    }
}

impl Nim {
    /// Start a game from the given pile layout, [`Player::One`] to move.
    pub fn new(initial: &[u32]) -> Self {
        Self {
            piles: initial.to_vec(),
            player: Player::One,
            winner: None,
        }
    }

    /// Current pile sizes.
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// The player whose turn it is.
    pub fn player(&self) -> Player {
        self.player
    }

    /// The winner, once the game is over.
    ///
    /// Under the misère convention this is the player who did **not** make
    /// the final move.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// True iff every pile is empty.
    pub fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&p| p == 0)
    }

    /// Enumerate every legal move for a pile configuration.
    ///
    /// For each pile with size > 0, every count from 1 up to that size is
    /// legal; empty piles contribute nothing. The result is empty iff the
    /// configuration is terminal.
    pub fn legal_moves(piles: &[u32]) -> Vec<Move> {
        let mut moves = Vec::new();
        for (pile, &size) in piles.iter().enumerate() {
            for count in 1..=size {
                moves.push(Move { pile, count });
            }
        }
        moves
    }

    /// Apply a move, advancing the turn.
    ///
    /// Decrements the named pile, flips the turn indicator, and if the move
    /// emptied the last pile records the *other* player as winner (the
    /// mover loses under misère rules).
    ///
    /// # Errors
    ///
    /// [`InvalidMove`] if the game is over, the pile index is out of range,
    /// or the count is zero or exceeds the pile's current size.
    pub fn apply(&mut self, mv: Move) -> Result<(), InvalidMove> {
        if self.winner.is_some() || self.is_terminal() {
            return Err(InvalidMove::GameOver);
        }
        if mv.pile >= self.piles.len() {
            return Err(InvalidMove::NoSuchPile {
                pile: mv.pile,
                num_piles: self.piles.len(),
            });
        }
        let available = self.piles[mv.pile];
        if mv.count < 1 || mv.count > available {
            return Err(InvalidMove::BadCount {
                pile: mv.pile,
                count: mv.count,
                available,
            });
        }

        self.piles[mv.pile] -= mv.count;
        self.player = self.player.other();

        // Misère rule: the mover emptied the board, so the player now on
        // turn (who never gets to move) is the winner.
        if self.is_terminal() {
            self.winner = Some(self.player);
        }
        Ok(())
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piles {:?}, {} to move", self.piles, self.player)
    }
}
