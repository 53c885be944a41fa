//! Coin Flip Demo
//!
//! Drives a `CoinFlipPlayer` headlessly through idle -> flipping -> settled
//! and prints the sampled layer values, either as a table or as JSON lines.
//!
//! Run with: cargo run -p coinflip_view --example flip_demo -- --result tails
//! Add `RUST_LOG=coinflip_view=debug` to see state transitions.

use anyhow::{Context, Result};
use clap::Parser;
use coinflip_view::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Play a coin flip and print sampled frames")]
struct Args {
    /// Outcome to settle on ("heads" or "tails"; anything else settles idle)
    #[arg(long, default_value = "heads")]
    result: String,

    /// Frames per second to sample
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of flips to play back to back
    #[arg(long, default_value_t = 1)]
    flips: u32,

    /// Optional TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the rendered tree and frames as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => CoinFlipConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CoinFlipConfig::standard(),
    };
    let result = FlipResult::parse_lenient(&args.result);
    let frame_ms = 1000.0 / args.fps.max(1) as f32;
    let flip_frames = (config.timing.flip_duration_ms as f32 / frame_ms).ceil() as u32;

    let scheduler = AnimationScheduler::new();
    let view = CoinFlipView::with_config(config).context("invalid config")?;
    let mut player = CoinFlipPlayer::new(view, scheduler.handle());

    print_tree(&args, player.update(&CoinFlipProps::idle()))?;
    print_frame(&args, 0, &player.sample())?;

    let mut frame_index = 0;
    for _ in 0..args.flips {
        print_tree(&args, player.update(&CoinFlipProps::flipping()))?;
        for _ in 0..flip_frames {
            scheduler.tick_by(frame_ms);
            frame_index += 1;
            print_frame(&args, frame_index, &player.sample())?;
        }

        print_tree(&args, player.update(&CoinFlipProps::new(false, result)))?;
        frame_index += 1;
        print_frame(&args, frame_index, &player.sample())?;
    }

    Ok(())
}

fn print_tree(args: &Args, tree: &VisualNode) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(tree)?);
    }
    Ok(())
}

fn print_frame(args: &Args, index: u32, frame: &FrameSample) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(frame)?);
        return Ok(());
    }

    println!(
        "{:>4} {:<10} {} rot={:>7.1} scale={:.2} glyph_opacity={:.2} glow_scale={:.2} glow_opacity={:.2}",
        index,
        format!("{:?}", frame.state),
        frame.symbol,
        frame.container.rotate_or_default(),
        frame.container.scale_x_or_default(),
        frame.glyph.opacity_or_default(),
        frame.glow.scale_x_or_default(),
        frame.glow.opacity_or_default(),
    );
    Ok(())
}
