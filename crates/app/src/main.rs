use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use app::file_store::FileStore;
use app::render;
use game_core::{Cell, CoinId, Direction, Game, GameConfig, LogEvent};

#[derive(Parser)]
#[command(author, version, about = "Deterministic geocoin collection game")]
struct Cli {
    /// Save directory override (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Grid tile size in degrees
    #[arg(long)]
    tile_degrees: Option<f64>,
    /// Neighborhood half-width in cells
    #[arg(long)]
    radius: Option<i32>,
    /// Cache spawn probability in [0, 1]
    #[arg(long)]
    spawn_probability: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MoveDirection {
    North,
    South,
    East,
    West,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::North => Self::North,
            MoveDirection::South => Self::South,
            MoveDirection::East => Self::East,
            MoveDirection::West => Self::West,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show player position, inventory, and world summary
    Status,
    /// Render the active neighborhood window
    Map,
    /// List active caches with their coins
    Caches,
    /// Step one or more tiles in a cardinal direction
    Move {
        direction: MoveDirection,
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Jump to an absolute position (external location feed)
    Goto {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },
    /// Collect every coin from the cache in cell (i, j)
    Collect {
        #[arg(allow_hyphen_values = true)]
        i: i64,
        #[arg(allow_hyphen_values = true)]
        j: i64,
    },
    /// Deposit the whole inventory into the cache in cell (i, j)
    Deposit {
        #[arg(allow_hyphen_values = true)]
        i: i64,
        #[arg(allow_hyphen_values = true)]
        j: i64,
    },
    /// Look up the origin cache of a coin id like "12:-34#0"
    Coin { id: String },
    /// Erase the saved game and return to the origin
    Reset {
        /// Confirm erasing all saved state
        #[arg(long)]
        yes: bool,
    },
}

fn build_config(cli: &Cli) -> GameConfig {
    let mut config = GameConfig::default();
    if let Some(tile_degrees) = cli.tile_degrees {
        config.tile_degrees = tile_degrees;
    }
    if let Some(radius) = cli.radius {
        config.neighborhood_radius = radius;
    }
    if let Some(spawn_probability) = cli.spawn_probability {
        config.spawn_probability = spawn_probability;
    }
    config
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dir = cli
        .data_dir
        .clone()
        .or_else(FileStore::default_dir)
        .context("could not determine a save directory; pass --data-dir")?;
    let mut store = FileStore::new(dir);

    let mut game = Game::load_from(&store, build_config(&cli))
        .context("failed to read saved game state")?;
    let log_mark = game.log().len();

    let mutated = match &cli.command {
        Command::Status => {
            print!("{}", render::render_status(&game));
            false
        }
        Command::Map => {
            print!("{}", render::render_map(&game));
            false
        }
        Command::Caches => {
            print!("{}", render::render_caches(&game));
            false
        }
        Command::Move { direction, steps } => {
            for _ in 0..*steps {
                game.step(Direction::from(*direction));
            }
            true
        }
        Command::Goto { lat, lng } => {
            game.set_location(*lat, *lng);
            true
        }
        Command::Collect { i, j } => {
            let moved = game.collect(Cell { i: *i, j: *j });
            if moved == 0 {
                println!("nothing to collect at {i}:{j}");
            }
            true
        }
        Command::Deposit { i, j } => {
            let moved = game.deposit(Cell { i: *i, j: *j });
            if moved == 0 {
                println!("no cache to deposit into at {i}:{j}");
            }
            true
        }
        Command::Coin { id } => {
            let coin_id: CoinId = id.parse()?;
            match game.cache_location_for_coin(coin_id) {
                Some(location) => {
                    println!(
                        "coin {} was minted at cache {} ({})",
                        coin_id,
                        coin_id.minting_cell().key(),
                        app::format_position(location)
                    );
                }
                None => println!("no known cache for coin {coin_id}"),
            }
            false
        }
        Command::Reset { yes } => {
            if !*yes {
                bail!("refusing to erase the saved game; pass --yes to confirm");
            }
            game.reset();
            true
        }
    };

    for event in &game.log()[log_mark..] {
        // Restores are routine window-rebuild noise; everything else is news.
        if !matches!(event, LogEvent::CacheRestored { .. }) {
            println!("{}", render::render_event(event));
        }
    }

    if mutated {
        game.save_to(&mut store).context("failed to save game state")?;
    }

    Ok(())
}
