//! Headless autoplay runner (default binary).
//!
//! Plays games with the beam-search player driving the engine and logs a summary per game.
//! Logging goes through `tracing`; pass `--log-level debug` (or set `RUST_LOG`) to see every
//! chain and chosen move. `--json` additionally prints one JSON summary line per game on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use tui_puyo::core::{spawn_column, GameConfig, GameEngine};
use tui_puyo::engine::{apply_place, MoveSearch};
use tui_puyo::types::{
    GameEvent, DEFAULT_BEAM_WIDTH, DEFAULT_COLUMNS, DEFAULT_VISIBLE_ROWS, HIDDEN_ROWS,
};

#[derive(Debug, Parser)]
#[command(about = "Play headless games with the beam-search autoplayer")]
struct Cli {
    #[arg(long, default_value_t = 1, help = "RNG seed for the pair sequence")]
    seed: u32,

    #[arg(long, default_value_t = 1, help = "Number of games to play")]
    games: u32,

    #[arg(long, default_value_t = 500, help = "Stop a game after this many pieces")]
    pieces: u32,

    #[arg(long, default_value_t = DEFAULT_COLUMNS, help = "Board width")]
    columns: u8,

    #[arg(long, default_value_t = DEFAULT_VISIBLE_ROWS, help = "Visible board height")]
    rows: u8,

    #[arg(long, default_value_t = 4, help = "Number of token colors")]
    colors: u8,

    #[arg(long, default_value_t = DEFAULT_BEAM_WIDTH, help = "Candidates kept after the first ply")]
    beam_width: usize,

    #[arg(
        long,
        help = "Log filter such as `info` or `tui_puyo_core=trace` (overrides RUST_LOG)"
    )]
    log_level: Option<String>,

    #[arg(long, help = "Print one JSON summary line per game on stdout")]
    json: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GameSummary {
    game: u32,
    score: u32,
    pieces: u32,
    max_chain: u32,
    topped_out: bool,
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let config = GameConfig {
        columns: cli.columns,
        visible_rows: cli.rows,
        dead_cells: vec![(spawn_column(cli.columns).max(0) as u8, HIDDEN_ROWS)],
        ..GameConfig::with_colors(cli.colors)
    };
    let mut engine =
        GameEngine::with_config(config, cli.seed).context("invalid board configuration")?;
    let search = MoveSearch::new(cli.beam_width);

    info!(
        seed = cli.seed,
        columns = cli.columns,
        rows = cli.rows,
        colors = cli.colors,
        beam_width = search.beam_width(),
        "starting autoplay"
    );

    engine.start();
    let mut total_score: u64 = 0;
    for game in 0..cli.games {
        if game > 0 {
            engine.restart();
        }

        let summary = play(&mut engine, &search, game, cli.pieces);
        total_score += summary.score as u64;
        if cli.json {
            let line = serde_json::to_string(&summary).context("failed to encode summary")?;
            println!("{line}");
        }
        info!(
            game,
            score = summary.score,
            pieces = summary.pieces,
            max_chain = summary.max_chain,
            topped_out = summary.topped_out,
            "game finished"
        );
    }

    if cli.games > 0 {
        info!(
            games = cli.games,
            mean_score = total_score / cli.games as u64,
            "autoplay done"
        );
    }
    Ok(())
}

fn play(engine: &mut GameEngine, search: &MoveSearch, game: u32, piece_limit: u32) -> GameSummary {
    while !engine.game_over() && engine.piece_id() <= piece_limit {
        let Some(mv) = search.think_for(engine) else {
            break;
        };

        if let Err(err) = apply_place(engine, mv) {
            warn!(code = err.code(), %err, ?mv, "placement rejected, dropping in place");
            if !engine.hard_drop() {
                break;
            }
        }

        for event in engine.drain_events() {
            if let GameEvent::ChainEnded { chains } = event {
                if chains >= 2 {
                    debug!(chains, score = engine.score(), "chain");
                }
            }
        }
    }

    GameSummary {
        game,
        score: engine.score(),
        pieces: engine.piece_id(),
        max_chain: engine.max_chain(),
        topped_out: engine.game_over(),
    }
}
