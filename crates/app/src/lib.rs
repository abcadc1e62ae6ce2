pub mod file_store;
pub mod render;

pub const APP_NAME: &str = "Geocoin";

/// Format a position as fixed six-decimal degrees, stable for display and
/// log comparison.
pub fn format_position(pos: game_core::LatLng) -> String {
    format!("{:.6}, {:.6}", pos.lat, pos.lng)
}

/// Total face value of a coin collection.
pub fn coin_total(coins: &[game_core::Coin]) -> u32 {
    coins.iter().map(|coin| coin.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Coin, CoinId, LatLng};

    #[test]
    fn format_position_uses_six_decimals() {
        let pos = LatLng::new(36.98949379578401, -122.06277128548504);
        assert_eq!(format_position(pos), "36.989494, -122.062771");
    }

    #[test]
    fn coin_total_sums_face_values() {
        let coins: Vec<Coin> = (0..3)
            .map(|serial| Coin { id: CoinId { i: 1, j: 2, serial }, value: 1 })
            .collect();
        assert_eq!(coin_total(&coins), 3);
        assert_eq!(coin_total(&[]), 0);
    }
}
