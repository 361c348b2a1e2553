//! Tabular Q-learning module.
//!
//! This module contains everything above the game rules: the action-value
//! table, the epsilon-greedy selection policy, the self-play training
//! loop, and a parallel evaluation harness.
//!
//! # Overview
//!
//! Q-learning estimates, per `(state, move)` pair, the expected future
//! reward of taking that move. Training is pure self-play:
//!
//! 1. Both sides share one table and one epsilon-greedy policy
//! 2. The move that empties the board is punished with reward −1
//! 3. The winner's preceding move is credited with reward +1
//! 4. Every other move receives reward 0 plus the best estimate of its
//!    successor, one round later
//!
//! **Temporal-difference update**:
//! ```text
//! Q(s, a) ← Q(s, a) + α·((reward + max_a' Q(s', a')) − Q(s, a))
//! ```
//!
//! # Usage
//!
//! 1. Build a [`QConfig`] (α, ε, starting layout, seed)
//! 2. Create a [`Trainer`] and call [`Trainer::train`]
//! 3. Query moves with [`Trainer::best_move`], or take the table with
//!    [`Trainer::into_table`] and drive a front end yourself
//!
//! # Example
//!
//! ```
//! use nim_selfplay::{QConfig, Trainer, evaluate};
//!
//! let config = QConfig::default().with_seed(42);
//! let mut trainer = Trainer::new(config).unwrap();
//! let stats = trainer.train(5_000);
//! println!("{} entries in {:.2}s", stats.entries, stats.elapsed_seconds);
//!
//! let report = evaluate(trainer.table(), &[1, 3, 5, 7], 100, 42);
//! println!("win rate vs random: {:.1}%", report.policy_win_rate * 100.0);
//! ```

pub mod config;
pub mod evaluate;
pub mod policy;
pub mod table;
pub mod trainer;

// Re-export main types for convenient access
pub use config::{ConfigError, QConfig, TrainStats};
pub use evaluate::{evaluate, MatchReport};
pub use policy::{greedy_move, EpsilonGreedy};
pub use table::{QTable, StateKey};
pub use trainer::{train, Trainer};
