//! Epsilon-greedy move selection over the Q table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::nim::{Move, Nim};
use crate::qlearn::table::QTable;

/// Epsilon-greedy action selection policy.
///
/// With probability ε the policy explores (uniform choice over the legal
/// moves); otherwise it exploits, picking uniformly among the moves whose
/// stored estimate ties for the maximum. Early in training nearly every
/// estimate is the 0.0 default, so the exploit branch itself plays close
/// to uniformly random until the table differentiates the moves.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Create a policy with the given exploration probability.
    ///
    /// A seed makes every choice reproducible; `None` seeds from entropy.
    pub fn new(epsilon: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { epsilon, rng }
    }

    /// The exploration probability ε.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Choose a move at `piles`, or `None` if the state is terminal.
    ///
    /// With `explore` set, the ε branch draws uniformly from the legal
    /// moves computed here and now, never a cached set. With `explore`
    /// unset ε is ignored entirely (pure exploitation, used for play and
    /// evaluation after training).
    pub fn choose(&mut self, table: &QTable, piles: &[u32], explore: bool) -> Option<Move> {
        let moves = Nim::legal_moves(piles);
        if moves.is_empty() {
            return None;
        }

        if explore && self.rng.gen::<f64>() < self.epsilon {
            return Some(moves[self.rng.gen_range(0..moves.len())]);
        }

        greedy_move(table, piles, &mut self.rng)
    }
}

/// Pick uniformly among the legal moves whose estimate ties for the
/// maximum, using the caller's RNG for the tie-break.
///
/// Ties use exact equality of the retrieved estimates. Returns `None` iff
/// the state is terminal. Shared between [`EpsilonGreedy`] and the
/// evaluation harness, whose per-game RNGs drive the tie-break.
pub fn greedy_move<R: Rng>(table: &QTable, piles: &[u32], rng: &mut R) -> Option<Move> {
    let moves = Nim::legal_moves(piles);
    if moves.is_empty() {
        return None;
    }

    let mut max_q = f64::NEG_INFINITY;
    let mut best = Vec::new();
    for mv in moves {
        let q = table.get(piles, mv);
        if q > max_q {
            max_q = q;
            best.clear();
            best.push(mv);
        } else if q == max_q {
            best.push(mv);
        }
    }

    Some(best[rng.gen_range(0..best.len())])
}
