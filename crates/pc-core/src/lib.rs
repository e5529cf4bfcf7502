//! pickchef/crates/pc-core/src/lib.rs
//!
//! The central domain model, payload schemas and persistence port for PickChef.

pub mod models;
pub mod schemas;
pub mod traits;
pub mod error;

// Re-exporting for easier access in other crates
pub use models::*;
pub use schemas::*;
pub use traits::*;
pub use error::*;


#[cfg(test)]
mod tests {
    use super::models::*;

    fn recipe() -> Recipe {
        Recipe {
            id: 7,
            title: "Pancakes".to_string(),
            description: None,
            instructions: "Mix and fry.".to_string(),
            cooking_time: Some(20),
            difficulty: Difficulty::Easy,
            servings: 4,
            image_url: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[3, 4, 5]), 4.0);
        assert_eq!(average_rating(&[1, 2]), 1.5);
    }

    #[test]
    fn test_recipe_detail_serializes_flat() {
        let detail = RecipeDetail::assemble(recipe(), vec![], &[5, 4]);
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["average_rating"], 4.5);
        assert!(json["ingredients"].as_array().unwrap().is_empty());
        assert!(json.get("recipe").is_none());
    }

    #[test]
    fn test_difficulty_round_trips_text() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.as_str().parse::<Difficulty>().unwrap(), d);
        }
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
