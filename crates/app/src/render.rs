//! Text views over the game state: the neighborhood map, cache listings,
//! and event lines. Replaces a map-marker surface with plain terminal
//! output; all functions are pure string builders.

use game_core::{Cell, Game, LogEvent};

use crate::{coin_total, format_position};

/// ASCII rendering of the active window, north up. `@` is the player,
/// `O` a cache holding coins, `o` an emptied cache, `.` an empty cell.
pub fn render_map(game: &Game) -> String {
    let radius = game.config().neighborhood_radius;
    let player_cell = game.player_cell();
    let mut out = String::new();

    for di in (-radius..=radius).rev() {
        for dj in -radius..=radius {
            let cell = Cell {
                i: player_cell.i + i64::from(di),
                j: player_cell.j + i64::from(dj),
            };
            let glyph = if cell == player_cell {
                '@'
            } else {
                match game.state().caches.get(&cell) {
                    Some(cache) if !cache.coins.is_empty() => 'O',
                    Some(_) => 'o',
                    None => '.',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out
}

pub fn render_status(game: &Game) -> String {
    let player = &game.state().player;
    let mut out = String::new();
    out.push_str(&format!("Position:  {}\n", format_position(player.location)));
    out.push_str(&format!("Cell:      {}\n", game.player_cell().key()));
    out.push_str(&format!(
        "Inventory: {} coins (value {})\n",
        player.coins.len(),
        coin_total(&player.coins)
    ));
    for coin in &player.coins {
        out.push_str(&format!("  {}\n", coin.id));
    }
    out.push_str(&format!("History:   {} positions\n", player.history.len()));
    out.push_str(&format!(
        "World:     {} active caches, {} remembered\n",
        game.state().caches.len(),
        game.mementos().len()
    ));
    out
}

pub fn render_caches(game: &Game) -> String {
    let mut out = String::new();
    for (cell, cache) in &game.state().caches {
        out.push_str(&format!(
            "{} @ {}: {} coins",
            cell.key(),
            format_position(cache.location),
            cache.coins.len()
        ));
        if !cache.coins.is_empty() {
            let ids: Vec<String> = cache.coins.iter().map(|coin| coin.id.to_string()).collect();
            out.push_str(&format!(" [{}]", ids.join(", ")));
        }
        out.push('\n');
    }
    out
}

pub fn render_event(event: &LogEvent) -> String {
    match event {
        LogEvent::PlayerMoved { to } => format!("moved to {}", format_position(*to)),
        LogEvent::CacheSpawned { cell, coin_count } => {
            format!("cache spawned at {} with {coin_count} coins", cell.key())
        }
        LogEvent::CacheRestored { cell, coin_count } => {
            format!("cache restored at {} with {coin_count} coins", cell.key())
        }
        LogEvent::CoinsCollected { cell, count } => {
            format!("collected {count} coins from {}", cell.key())
        }
        LogEvent::CoinsDeposited { cell, count } => {
            format!("deposited {count} coins into {}", cell.key())
        }
        LogEvent::WorldReset => "world reset".to_string(),
    }
}
