use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Color the backend assigns when a create request carries none.
pub const DEFAULT_COLOR: &str = "#4caf50";

const COLOR_PALETTE: [&str; 12] = [
    "#e53935", "#d81b60", "#8e24aa", "#5e35b1", "#3949ab", "#1e88e5", "#00897b", "#43a047",
    "#fdd835", "#fb8c00", "#f4511e", "#6d4c41",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Picks a display color for a new category. Creation is the only write
/// this client performs on categories; edit and delete stay server-side.
pub fn random_color() -> String {
    COLOR_PALETTE
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_COLOR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{Category, DEFAULT_COLOR, random_color};

    #[test]
    fn missing_color_falls_back_to_default() {
        let raw = serde_json::json!({ "id": "c1", "name": "Work" });
        let category: Category = serde_json::from_value(raw).expect("category deserialize");
        assert_eq!(category.color, DEFAULT_COLOR);
    }

    #[test]
    fn random_color_is_a_hex_triplet() {
        let color = random_color();
        assert!(color.starts_with('#'));
        assert_eq!(color.len(), 7);
    }
}
