use std::hash::Hasher;

use anyhow::Result;
use clap::Parser;
use game_core::luck::{initial_coin_count, luck, spawn_key};
use game_core::{Cell, GameConfig, LatLng};
use xxhash_rust::xxh3::Xxh3;

/// Offline spawn census: enumerates the deterministic cache layout around a
/// position without touching any saved game. Two runs with the same
/// arguments must print identical output and census hash.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Center latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Center longitude
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,
    /// Half-width of the surveyed square, in cells
    #[arg(long, default_value_t = 8)]
    radius: i64,
    /// Grid tile size in degrees
    #[arg(long)]
    tile_degrees: Option<f64>,
    /// Spawn probability threshold
    #[arg(long)]
    spawn_probability: Option<f64>,
    /// Print every spawning cell, not just the summary
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let defaults = GameConfig::default();
    let tile_degrees = args.tile_degrees.unwrap_or(defaults.tile_degrees);
    let spawn_probability = args.spawn_probability.unwrap_or(defaults.spawn_probability);
    let center = LatLng::new(
        args.lat.unwrap_or(defaults.origin.lat),
        args.lng.unwrap_or(defaults.origin.lng),
    );

    let center_cell = Cell::containing(center, tile_degrees);
    let mut hasher = Xxh3::new();
    let mut spawning_cells = 0_u64;
    let mut total_coins = 0_u64;
    let surveyed = (2 * args.radius + 1).pow(2);

    for di in -args.radius..=args.radius {
        for dj in -args.radius..=args.radius {
            let cell = Cell { i: center_cell.i + di, j: center_cell.j + dj };
            if luck(&spawn_key(cell)) >= spawn_probability {
                continue;
            }
            let coins = initial_coin_count(cell);
            spawning_cells += 1;
            total_coins += u64::from(coins);
            hasher.write_i64(cell.i);
            hasher.write_i64(cell.j);
            hasher.write_u32(coins);
            if args.verbose {
                println!("{}  {} coins", cell.key(), coins);
            }
        }
    }

    println!("Surveyed {surveyed} cells around {}", center_cell.key());
    println!("Spawning cells: {spawning_cells}");
    println!("Total minted coins: {total_coins}");
    println!("Census hash: 0x{:016x}", hasher.finish());

    Ok(())
}
