//! Evaluation harness: greedy policy vs. a uniform-random opponent.
//!
//! Each match is an independent read-only consumer of the learned table,
//! so matches run in parallel; only training itself is serialized, because
//! the table's read-modify-write update contract forbids unordered
//! concurrent writes to the same key.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::nim::{Nim, Player};
use crate::qlearn::policy::greedy_move;
use crate::qlearn::table::QTable;

/// Outcome of an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Number of games played.
    pub games: u64,
    /// Games the greedy policy won.
    pub policy_wins: u64,
    /// Fraction of games the greedy policy won.
    pub policy_win_rate: f64,
}

/// Play `games` matches of the greedy policy against a uniform-random
/// opponent, alternating who opens.
///
/// Matches run in parallel; each derives its own RNG from `seed` and the
/// game index, so a run is reproducible regardless of scheduling.
pub fn evaluate(table: &QTable, initial_piles: &[u32], games: u64, seed: u64) -> MatchReport {
    let policy_wins: u64 = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i));
            // Seats alternate so neither side always opens.
            let policy_seat = if i % 2 == 0 { Player::One } else { Player::Two };
            u64::from(play_one(table, initial_piles, policy_seat, &mut rng) == policy_seat)
        })
        .sum();

    MatchReport {
        games,
        policy_wins,
        policy_win_rate: if games > 0 {
            policy_wins as f64 / games as f64
        } else {
            0.0
        },
    }
}

/// Play a single match and return the winner.
fn play_one(table: &QTable, initial_piles: &[u32], policy_seat: Player, rng: &mut StdRng) -> Player {
    let mut game = Nim::new(initial_piles);
    loop {
        let mv = if game.player() == policy_seat {
            greedy_move(table, game.piles(), rng)
        } else {
            let moves = Nim::legal_moves(game.piles());
            Some(moves[rng.gen_range(0..moves.len())])
        }
        .expect("match reached a non-terminal state with no legal moves");

        game.apply(mv).expect("evaluation produced an illegal move");

        if let Some(winner) = game.winner() {
            return winner;
        }
    }
}
