//! # Nim Self-Play
//!
//! A tabular Q-learning engine that learns misère Nim from scratch by
//! self-play, with no supervision signal other than win/loss outcomes.
//!
//! ## Features
//!
//! - **Misère Nim state machine**: legal-move enumeration, move
//!   application, loser detection
//! - **Action-Value table**: `(state, move)` estimates with the classic
//!   temporal-difference update
//! - **Epsilon-greedy policy**: seedable exploration and uniform
//!   tie-breaking among maximizers
//! - **Self-play trainer**: per-player pending-move credit assignment
//!   across alternating turns
//! - **Parallel evaluation**: trained policy vs. random opponent
//!
//! ## Quick Start
//!
//! ```
//! use nim_selfplay::{QConfig, Trainer};
//!
//! // 1. Configure a run (α = 0.5, ε = 0.1, piles [1, 3, 5, 7])
//! let config = QConfig::default().with_seed(42);
//!
//! // 2. Train by self-play
//! let mut trainer = Trainer::new(config).unwrap();
//! trainer.train(10_000);
//!
//! // 3. Query the learned policy (exploration disabled)
//! let opening = trainer.best_move(&[1, 3, 5, 7]);
//! assert!(opening.is_some());
//! ```
//!
//! ## Modules
//!
//! - [`nim`]: Game rules and state machine
//! - [`qlearn`]: Table, policy, trainer, and evaluation harness
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │              Self-Play Trainer                 │
//! │  - episode loop      - pending-move credit     │
//! │  - TD updates        - stats/progress          │
//! └────────────────────────────────────────────────┘
//!          │                    │
//!          ▼                    ▼
//! ┌─────────────────┐   ┌─────────────────┐
//! │ EpsilonGreedy   │──▶│     QTable      │
//! │ (choose moves)  │   │ (value storage) │
//! └─────────────────┘   └─────────────────┘
//!          │                    │
//!          └────────┬───────────┘
//!                   ▼
//!          ┌─────────────────┐
//!          │   Nim (rules)   │
//!          └─────────────────┘
//! ```

#![warn(missing_docs)]

/// Misère Nim game rules and state machine.
pub mod nim;

/// Tabular Q-learning: table, policy, trainer, evaluation.
pub mod qlearn;

// Re-export commonly used types at crate root for convenience
pub use nim::{InvalidMove, Move, Nim, Player};
pub use qlearn::{
    evaluate, greedy_move, train, ConfigError, EpsilonGreedy, MatchReport, QConfig, QTable,
    StateKey, TrainStats, Trainer,
};
