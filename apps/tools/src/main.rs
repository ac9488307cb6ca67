use std::{collections::HashMap, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gallery::Gallery;
use match_core::{
    Board, ClickOutcome, ImageId, Resolution, ScoreRules, Session, Summary, TileId, GRID_SIDE,
};
use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

const MAX_TURNS_PER_GAME: u32 = 10_000;

#[derive(Parser, Debug)]
struct Cli {
    /// Seed for every random choice; omit for a fresh one.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an image folder and show which images a game would use.
    CheckFolder { folder: PathBuf },
    /// Print a dealt board.
    Deal {
        #[arg(long)]
        json: bool,
    },
    /// Play games headlessly and report score statistics.
    Simulate {
        #[arg(long, default_value_t = 100)]
        games: u32,
        #[arg(long, value_enum, default_value_t = Strategy::Memory)]
        strategy: Strategy,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Remembers every revealed tile and completes known pairs.
    Memory,
    /// Picks uniformly among selectable tiles.
    Random,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match cli.command {
        Command::CheckFolder { folder } => {
            let gallery = Gallery::open(&folder, &mut rng)
                .with_context(|| format!("'{}' cannot be used", folder.display()))?;
            println!("{} is usable; a game would use:", folder.display());
            for entry in gallery.images() {
                println!("  image {} = {}", entry.id, entry.name);
            }
        }
        Command::Deal { json } => {
            let board = Board::deal(&mut rng);
            if json {
                println!("{}", serde_json::to_string_pretty(&board.layout())?);
            } else {
                print!("{}", render_layout(&board.layout()));
            }
        }
        Command::Simulate { games, strategy } => {
            if games == 0 {
                bail!("--games must be at least 1");
            }
            let rules = ScoreRules::default();
            let mut summaries = Vec::with_capacity(games as usize);
            for _ in 0..games {
                summaries.push(play_game(&mut rng, strategy, rules)?);
            }
            print!("{}", render_stats(strategy, &summaries));
        }
    }

    Ok(())
}

fn render_layout(layout: &[ImageId]) -> String {
    let mut out = String::new();
    for row in layout.chunks(GRID_SIDE) {
        let cells: Vec<String> = row.iter().map(|image| format!("{:>2}", image.0)).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

fn render_stats(strategy: Strategy, summaries: &[Summary]) -> String {
    let count = summaries.len().max(1) as f64;
    let mean_score = summaries.iter().map(|s| s.score as f64).sum::<f64>() / count;
    let mean_turns = summaries.iter().map(|s| s.turns as f64).sum::<f64>() / count;
    let best = summaries.iter().map(|s| s.score).max().unwrap_or_default();
    let worst = summaries.iter().map(|s| s.score).min().unwrap_or_default();
    format!(
        "strategy={strategy:?} games={}\nmean score={mean_score:.1} best={best} worst={worst}\nmean turns={mean_turns:.1}\n",
        summaries.len()
    )
}

fn play_game<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: Strategy,
    rules: ScoreRules,
) -> Result<Summary> {
    let mut session = Session::start(rng, rules);
    let mut seen: HashMap<TileId, ImageId> = HashMap::new();

    loop {
        if session.turns() > MAX_TURNS_PER_GAME {
            bail!("simulation did not finish within {MAX_TURNS_PER_GAME} turns");
        }

        let first = pick_first(&session, &seen, strategy, rng)?;
        let first_image = match session.click(first)? {
            ClickOutcome::FirstRevealed { image, .. } => image,
            other => bail!("unexpected outcome for first click: {other:?}"),
        };
        seen.insert(first, first_image);

        let second = pick_second(&session, &seen, first, first_image, strategy, rng)?;
        session.click(second)?;
        if let Some(tile) = session.tile(second) {
            seen.insert(second, tile.image);
        }

        match session.resolve()? {
            Resolution::GameOver(summary) => {
                tracing::debug!(
                    score = summary.score,
                    turns = summary.turns,
                    ?strategy,
                    "simulated game finished"
                );
                return Ok(summary);
            }
            Resolution::Continue { matched: true } => {
                seen.remove(&first);
                seen.remove(&second);
            }
            Resolution::Continue { matched: false } => {}
        }
    }
}

fn selectable(session: &Session) -> Vec<TileId> {
    session
        .tiles()
        .iter()
        .filter(|tile| !tile.is_matched() && !tile.is_revealed())
        .map(|tile| tile.id)
        .collect()
}

fn pick_first<R: Rng + ?Sized>(
    session: &Session,
    seen: &HashMap<TileId, ImageId>,
    strategy: Strategy,
    rng: &mut R,
) -> Result<TileId> {
    let candidates = selectable(session);
    if strategy == Strategy::Memory {
        if let Some(tile) = known_pair(seen) {
            return Ok(tile);
        }
        let unseen: Vec<TileId> = candidates
            .iter()
            .copied()
            .filter(|tile| !seen.contains_key(tile))
            .collect();
        if let Some(tile) = unseen.choose(rng) {
            return Ok(*tile);
        }
    }
    candidates
        .choose(rng)
        .copied()
        .context("no selectable tile left for the first click")
}

fn pick_second<R: Rng + ?Sized>(
    session: &Session,
    seen: &HashMap<TileId, ImageId>,
    first: TileId,
    first_image: ImageId,
    strategy: Strategy,
    rng: &mut R,
) -> Result<TileId> {
    let candidates = selectable(session);
    if strategy == Strategy::Memory {
        if let Some(partner) = seen
            .iter()
            .find(|(tile, image)| **tile != first && **image == first_image)
            .map(|(tile, _)| *tile)
        {
            return Ok(partner);
        }
        let unseen: Vec<TileId> = candidates
            .iter()
            .copied()
            .filter(|tile| !seen.contains_key(tile))
            .collect();
        if let Some(tile) = unseen.choose(rng) {
            return Ok(*tile);
        }
    }
    candidates
        .choose(rng)
        .copied()
        .context("no selectable tile left for the second click")
}

/// A tile whose partner has also been seen, lowest id first for determinism.
fn known_pair(seen: &HashMap<TileId, ImageId>) -> Option<TileId> {
    let mut tiles: Vec<(&TileId, &ImageId)> = seen.iter().collect();
    tiles.sort();
    tiles.iter().find_map(|(tile, image)| {
        seen.iter()
            .any(|(other, other_image)| other != *tile && other_image == *image)
            .then_some(**tile)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_strategy_always_clears_the_board() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let summary =
                play_game(&mut rng, Strategy::Memory, ScoreRules::default()).expect("game");

            assert!(summary.turns >= 8, "seed {seed}: {summary:?}");
            assert!(summary.score <= 100);
            if summary.turns <= 13 {
                assert_eq!(summary.score, 100);
            } else {
                assert_eq!(summary.score, 100 - 10 * (summary.turns as i32 - 13));
            }
        }
    }

    #[test]
    fn random_strategy_finishes() {
        let mut rng = StdRng::seed_from_u64(8);
        let summary = play_game(&mut rng, Strategy::Random, ScoreRules::default()).expect("game");

        assert!(summary.turns >= 8);
    }

    #[test]
    fn memory_beats_random_on_average() {
        let mut rng = StdRng::seed_from_u64(2024);
        let rules = ScoreRules::default();
        let memory: i32 = (0..40)
            .map(|_| play_game(&mut rng, Strategy::Memory, rules).expect("game").turns as i32)
            .sum();
        let random: i32 = (0..40)
            .map(|_| play_game(&mut rng, Strategy::Random, rules).expect("game").turns as i32)
            .sum();

        assert!(memory < random, "memory {memory} vs random {random}");
    }

    #[test]
    fn layout_renders_as_grid() {
        let layout: Vec<ImageId> = (0..8).flat_map(|i| [ImageId(i), ImageId(i)]).collect();

        let rendered = render_layout(&layout);

        assert_eq!(rendered.lines().count(), GRID_SIDE);
        assert_eq!(rendered.lines().next(), Some(" 0  0  1  1"));
    }

    #[test]
    fn known_pair_needs_two_copies() {
        let mut seen = HashMap::new();
        seen.insert(TileId(3), ImageId(1));
        seen.insert(TileId(9), ImageId(2));
        assert_eq!(known_pair(&seen), None);

        seen.insert(TileId(12), ImageId(1));
        assert_eq!(known_pair(&seen), Some(TileId(3)));
    }

    #[test]
    fn stats_summarize_games() {
        let summaries = [
            Summary {
                score: 100,
                turns: 10,
            },
            Summary {
                score: 80,
                turns: 15,
            },
        ];

        let stats = render_stats(Strategy::Memory, &summaries);

        assert!(stats.contains("games=2"));
        assert!(stats.contains("mean score=90.0 best=100 worst=80"));
        assert!(stats.contains("mean turns=12.5"));
    }
}
