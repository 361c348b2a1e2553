//! Self-play training binary for misère Nim.
//!
//! Usage:
//!   cargo run --release --bin train_nim -- [OPTIONS]
//!
//! Options:
//!   --episodes <N>       Training episodes (default: 10000)
//!   --alpha <F>          Learning rate in (0, 1] (default: 0.5)
//!   --epsilon <F>        Exploration probability in [0, 1] (default: 0.1)
//!   --piles <LIST>       Comma-separated starting layout (default: 1,3,5,7)
//!   --seed <N>           Random seed (optional)
//!   --eval-games <N>     Evaluation games vs random opponent (default: 1000)
//!   --output <FILE>      Write JSON summary to file (optional)

use std::env;
use std::fs::File;
use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use nim_selfplay::{evaluate, MatchReport, Move, Nim, QConfig, TrainStats, Trainer};

#[derive(Serialize)]
struct RunSummary {
    config: QConfig,
    episodes: u64,
    stats: TrainStats,
    evaluation: MatchReport,
    opening: Option<Move>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut episodes: u64 = 10_000;
    let mut alpha: f64 = 0.5;
    let mut epsilon: f64 = 0.1;
    let mut piles: Vec<u32> = vec![1, 3, 5, 7];
    let mut seed: Option<u64> = None;
    let mut eval_games: u64 = 1_000;
    let mut output_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--episodes" | "-n" => {
                i += 1;
                if i < args.len() {
                    episodes = args[i].parse().unwrap_or(episodes);
                }
            }
            "--alpha" | "-a" => {
                i += 1;
                if i < args.len() {
                    alpha = args[i].parse().unwrap_or(alpha);
                }
            }
            "--epsilon" | "-e" => {
                i += 1;
                if i < args.len() {
                    epsilon = args[i].parse().unwrap_or(epsilon);
                }
            }
            "--piles" | "-p" => {
                i += 1;
                if i < args.len() {
                    piles = args[i]
                        .split(',')
                        .filter_map(|p| p.trim().parse().ok())
                        .collect();
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--eval-games" => {
                i += 1;
                if i < args.len() {
                    eval_games = args[i].parse().unwrap_or(eval_games);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    let mut config = QConfig::default()
        .with_alpha(alpha)
        .with_epsilon(epsilon)
        .with_piles(piles);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    println!("=================================================");
    println!("  Misere Nim Self-Play Trainer");
    println!("=================================================");
    println!();
    println!("Layout:   {:?}", config.initial_piles);
    println!("Alpha:    {}", config.alpha);
    println!("Epsilon:  {}", config.epsilon);
    println!("Episodes: {}", episodes);
    println!();

    let mut trainer = match Trainer::new(config.clone()) {
        Ok(trainer) => trainer,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let bar = ProgressBar::new(episodes);
    bar.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} episodes ({per_sec}, eta {eta})",
        )
        .unwrap()
        .progress_chars("##-"),
    );

    let interval = (episodes / 100).max(1);
    let stats = trainer
        .train_with_callback(episodes, interval, |stats| {
            bar.set_position(stats.episodes);
        })
        .clone();
    bar.finish();

    println!();
    println!(
        "Trained {} episodes in {:.2}s ({:.0} eps/s), {} table entries",
        stats.episodes, stats.elapsed_seconds, stats.episodes_per_second, stats.entries
    );

    let opening = trainer.best_move(&config.initial_piles);
    match opening {
        Some(mv) => println!("Learned opening from {:?}: {}", config.initial_piles, mv),
        None => println!("Starting layout is terminal; no opening to learn"),
    }

    println!();
    println!("Evaluating over {} games vs random opponent...", eval_games);
    let report = evaluate(
        trainer.table(),
        &config.initial_piles,
        eval_games,
        seed.unwrap_or(0),
    );
    println!(
        "Policy won {}/{} games ({:.1}%)",
        report.policy_wins,
        report.games,
        report.policy_win_rate * 100.0
    );

    // Sanity check: the front-end-facing functions agree with the trainer.
    if let Some(mv) = opening {
        let mut game = Nim::new(&config.initial_piles);
        assert!(Nim::legal_moves(game.piles()).contains(&mv));
        game.apply(mv).expect("learned opening must be legal");
    }

    if let Some(path) = output_file {
        let summary = RunSummary {
            config,
            episodes,
            stats,
            evaluation: report,
            opening,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => match File::create(&path).and_then(|mut f| f.write_all(json.as_bytes())) {
                Ok(()) => println!("Summary written to {}", path),
                Err(e) => eprintln!("Error writing {}: {}", path, e),
            },
            Err(e) => eprintln!("Error serializing summary: {}", e),
        }
    }
}

fn print_help() {
    println!("Usage: train_nim [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --episodes, -n <N>    Training episodes (default: 10000)");
    println!("  --alpha, -a <F>       Learning rate in (0, 1] (default: 0.5)");
    println!("  --epsilon, -e <F>     Exploration probability in [0, 1] (default: 0.1)");
    println!("  --piles, -p <LIST>    Comma-separated starting layout (default: 1,3,5,7)");
    println!("  --seed, -s <N>        Random seed (optional)");
    println!("  --eval-games <N>      Evaluation games vs random opponent (default: 1000)");
    println!("  --output, -o <FILE>   Write JSON summary to file (optional)");
    println!("  --help, -h            Show this help");
}
