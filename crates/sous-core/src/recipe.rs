//! Recipe context for the step-by-step walkthrough mode.

use serde::{Deserialize, Serialize};

/// The recipe currently being walked through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeContext {
    pub title: String,
    pub servings: u32,
    pub prep_time_minutes: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeContext {
    pub fn new(
        title: impl Into<String>,
        servings: u32,
        prep_time_minutes: u32,
        ingredients: Vec<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            servings,
            prep_time_minutes,
            ingredients,
            steps,
        }
    }

    /// Render the recipe as the block embedded into the walkthrough prompt.
    pub fn prompt_block(&self) -> String {
        let mut out = format!("# {} (Serves {})\n\n## Ingredients\n", self.title, self.servings);
        for ingredient in &self.ingredients {
            out.push_str("- ");
            out.push_str(ingredient);
            out.push('\n');
        }
        out.push_str("\n## Steps\n");
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}. {step}\n", i + 1));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::RecipeContext;

    #[test]
    fn prompt_block_numbers_steps_from_one() {
        let recipe = RecipeContext::new(
            "Cacio e Pepe",
            2,
            20,
            vec!["200g spaghetti".to_string(), "pecorino".to_string()],
            vec!["Boil the pasta".to_string(), "Toss with cheese".to_string()],
        );
        let block = recipe.prompt_block();
        assert!(block.starts_with("# Cacio e Pepe (Serves 2)"));
        assert!(block.contains("- 200g spaghetti"));
        assert!(block.contains("1. Boil the pasta"));
        assert!(block.contains("2. Toss with cheese"));
    }
}
