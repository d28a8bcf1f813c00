//! Cook profile captured during onboarding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dish the user has cooked before, kept for suggestion variety.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    pub title: String,
    pub date: NaiveDate,
}

/// What we know about the cook. Persisted by an external storage
/// collaborator; this crate only shapes and renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: String,
    pub first_name: String,
    pub culinary_background: String,
    pub dietary_preferences: String,
    pub comfort_level: String,
    pub goals: String,
    #[serde(default)]
    pub dish_history: Vec<DishRecord>,
}

impl Profile {
    /// Record a finished dish at the end of the history.
    pub fn record_dish(&mut self, title: impl Into<String>, date: NaiveDate) {
        self.dish_history.push(DishRecord {
            title: title.into(),
            date,
        });
    }

    /// Render the profile as the block embedded into mode prompts.
    /// Only the five most recent dishes are listed.
    pub fn prompt_block(&self) -> String {
        let mut lines = vec![
            format!("Name: {} ({})", self.first_name, self.full_name),
            format!("Culinary background: {}", self.culinary_background),
            format!("Dietary preferences: {}", self.dietary_preferences),
            format!("Comfort level: {}", self.comfort_level),
            format!("Goals: {}", self.goals),
        ];
        if !self.dish_history.is_empty() {
            let start = self.dish_history.len().saturating_sub(5);
            let dishes = self.dish_history[start..]
                .iter()
                .map(|d| format!("{} ({})", d.title, d.date))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("Recent dishes cooked: {dishes}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::Profile;
    use chrono::NaiveDate;

    fn profile() -> Profile {
        Profile {
            full_name: "Alice Moreau".to_string(),
            first_name: "Alice".to_string(),
            culinary_background: "home-style French".to_string(),
            dietary_preferences: "no shellfish".to_string(),
            comfort_level: "can follow a recipe".to_string(),
            goals: "quick weeknight meals".to_string(),
            dish_history: Vec::new(),
        }
    }

    #[test]
    fn prompt_block_omits_history_when_empty() {
        let block = profile().prompt_block();
        assert!(block.contains("Name: Alice (Alice Moreau)"));
        assert!(!block.contains("Recent dishes"));
    }

    #[test]
    fn prompt_block_lists_only_last_five_dishes() {
        let mut p = profile();
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        for i in 1..=7 {
            p.record_dish(format!("dish-{i}"), date);
        }
        let block = p.prompt_block();
        assert!(!block.contains("dish-1"));
        assert!(!block.contains("dish-2"));
        assert!(block.contains("dish-3"));
        assert!(block.contains("dish-7"));
    }
}
