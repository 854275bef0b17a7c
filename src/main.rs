//! xfboard - headless demo of the board widget
//!
//! Renders a position into an in-memory raster, replays drag gestures
//! through the same pointer path a browser host uses, prints every move
//! published on `move_before` as JSON and optionally writes the result as a
//! PPM image.
//!
//! ```text
//! xfboard --drag e2e4 --drag e7e5 --flip --out board.ppm
//! RUST_LOG=xfboard=trace xfboard --setup --drag a8e4
//! ```

use anyhow::{bail, Context, Result};
use board_rules::Square;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xfboard::core::settings_persistence::{default_config_path, load_or_default, save_config};
use xfboard::{Board, BoardMode, PointerEvent, Raster, MOVE_BEFORE};

/// Headless XFBoard demo
#[derive(Parser, Debug)]
#[command(name = "xfboard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file (defaults to the per-user config, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective config back to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Starting position
    #[arg(long)]
    fen: Option<String>,

    /// Start in setup mode
    #[arg(long)]
    setup: bool,

    /// Put black at the bottom
    #[arg(long)]
    flip: bool,

    /// Board size in pixels
    #[arg(long, default_value_t = 320)]
    size: u32,

    /// Highlight the last move
    #[arg(long)]
    highlight: bool,

    /// Moves in SAN to play before any drag
    #[arg(long = "san", value_name = "SAN")]
    san: Vec<String>,

    /// Drag gestures as source and destination squares, e.g. e2e4
    #[arg(long = "drag", value_name = "MOVE")]
    drags: Vec<String>,

    /// Write the final board as a binary PPM
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn parse_drag(gesture: &str) -> Result<(Square, Square)> {
    let gesture = gesture.replace('-', "");
    if gesture.len() != 4 || !gesture.is_ascii() {
        bail!("drag '{}' is not of the form e2e4", gesture);
    }
    let from = gesture[..2].parse().with_context(|| format!("bad source in '{gesture}'"))?;
    let to = gesture[2..].parse().with_context(|| format!("bad destination in '{gesture}'"))?;
    Ok((from, to))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_or_default(&config_path);
    config.height = args.size;
    config.width = args.size;
    if args.fen.is_some() {
        config.fen = args.fen.clone();
    }
    if args.setup {
        config.mode = BoardMode::Setup;
    }
    if args.highlight {
        config.highlight_last_move = true;
    }

    if args.save_config {
        save_config(&config_path, &config)
            .with_context(|| format!("saving config to {}", config_path.display()))?;
        println!("Saved config to {}", config_path.display());
        return Ok(());
    }

    let mut board = Board::new(config, Raster::new(0, 0), Raster::new(0, 0))
        .context("initializing board")?;
    board.subscribe(Some(MOVE_BEFORE), |outcome| {
        println!("{}", serde_json::to_string(outcome)?);
        Ok(())
    });

    if args.flip {
        board.flip();
    }

    for san in &args.san {
        if !board.move_san(san).is_committed() {
            bail!("move '{}' was rejected", san);
        }
    }

    for gesture in &args.drags {
        let (from, to) = parse_drag(gesture)?;
        let layout = *board.pipeline().layout();
        let (x0, y0) = layout.square_center(from);
        let (x1, y1) = layout.square_center(to);

        if !board.pointer_down(PointerEvent::mouse(x0, y0)) {
            bail!("nothing to drag on {}", from);
        }
        board.pointer_move(PointerEvent::mouse((x0 + x1) / 2, (y0 + y1) / 2));
        board.pointer_move(PointerEvent::mouse(x1, y1));
        let outcome = board.pointer_up(PointerEvent::mouse(x1, y1));
        info!("{} -> {:?}", gesture, outcome);
    }

    println!("{}", board.fen());
    if board.is_mate() {
        println!("Checkmate, {} to move", board.active_color());
    } else if board.is_stalemate() {
        println!("Stalemate");
    }

    if let Some(path) = &args.out {
        fs::write(path, board.live().to_ppm())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
