use std::path::PathBuf;

mod config;
mod controller;
mod ui;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use eframe::egui;
use gallery::Gallery;
use match_core::{PlayerColor, Session};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use crate::{controller::GameController, ui::MatchGameApp};

const WINDOW_TITLE: &str = "Match it!";

/// A single player matching game.
#[derive(Parser, Debug)]
#[command(name = "match_it")]
struct Args {
    /// What color would you like for the player?
    #[arg(value_enum)]
    color: ColorChoice,
    /// What folder contains the game images?
    #[arg(value_parser = parse_image_folder)]
    image_folder: PathBuf,
    /// Fast or slow game?
    #[arg(short, long)]
    fast: bool,
    /// Settings file (defaults to ./match_it.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for image choice and tile shuffles.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Blue,
    Green,
    Magenta,
}

impl From<ColorChoice> for PlayerColor {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Blue => PlayerColor::Blue,
            ColorChoice::Green => PlayerColor::Green,
            ColorChoice::Magenta => PlayerColor::Magenta,
        }
    }
}

fn parse_image_folder(raw: &str) -> Result<PathBuf, String> {
    let folder = PathBuf::from(raw);
    gallery::validate_folder(&folder).map_err(|err| err.to_string())?;
    Ok(folder)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;
    let player_color = PlayerColor::from(args.color);
    tracing::info!(
        color = %player_color,
        fast = args.fast,
        ?settings,
        "starting match game"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let gallery = Gallery::open(&args.image_folder, &mut rng)
        .with_context(|| format!("failed to open '{}'", args.image_folder.display()))?;
    let images = gallery
        .decode_all(settings.image_max_side())
        .context("failed to decode tile images")?;

    let session = Session::start(&mut rng, settings.score_rules());
    let controller = GameController::new(session, rng, settings.reveal_delay(args.fast));
    tracing::info!(
        reveal_delay_ms = controller.reveal_delay().as_millis() as u64,
        images = gallery.images().len(),
        "board dealt"
    );

    let tile_size = settings.tile_size;
    let side = ui::board::board_side(tile_size);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([side + 32.0, side + 110.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            Ok(Box::new(MatchGameApp::new(
                cc,
                controller,
                images,
                player_color,
                tile_size,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("game window failed: {err}"))
}
