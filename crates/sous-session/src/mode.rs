//! Conversation modes and transition directives.

use sous_core::{Profile, RecipeContext};

/// The active conversational mode. Each mode owns its own prompt surface,
/// but all modes share one history, frame buffer, and compaction state.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationMode {
    /// First meeting: capture the cook's profile.
    Onboarding,
    /// Main conversation: suggest dishes, answer questions.
    Chef,
    /// Step-by-step walkthrough of a chosen recipe.
    Recipe { recipe: RecipeContext },
}

impl ConversationMode {
    pub fn name(&self) -> &'static str {
        match self {
            ConversationMode::Onboarding => "onboarding",
            ConversationMode::Chef => "chef",
            ConversationMode::Recipe { .. } => "recipe",
        }
    }

    /// Compose the mode-specific context block for the prompt. The prompt
    /// prose itself lives with the prompt collaborator; this only renders
    /// the dynamic parts.
    pub fn prompt_context(&self, profile: Option<&Profile>) -> String {
        match self {
            ConversationMode::Onboarding => String::new(),
            ConversationMode::Chef => profile.map(Profile::prompt_block).unwrap_or_default(),
            ConversationMode::Recipe { recipe } => {
                let mut block = recipe.prompt_block();
                if let Some(profile) = profile {
                    block.push('\n');
                    block.push_str(&profile.prompt_block());
                }
                block
            }
        }
    }
}

/// Side effects a transition asks the caller to perform. Returned as
/// values rather than executed in place, so the transport and storage
/// collaborators stay outside this core.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Persist the freshly captured profile.
    SaveProfile(Profile),
    /// Push the recipe card to the user's screen.
    PublishRecipeStart(RecipeContext),
    /// Clear the recipe card.
    PublishRecipeEnd,
    /// Append the finished dish to the cook's history.
    RecordDish { title: String },
}

#[cfg(test)]
mod tests {
    use sous_core::{Profile, RecipeContext};

    use super::ConversationMode;

    fn profile() -> Profile {
        Profile {
            full_name: "Ben Okafor".to_string(),
            first_name: "Ben".to_string(),
            culinary_background: "West African home cooking".to_string(),
            dietary_preferences: "none".to_string(),
            comfort_level: "likes to improvise".to_string(),
            goals: "master jollof rice".to_string(),
            dish_history: Vec::new(),
        }
    }

    #[test]
    fn onboarding_has_no_prompt_context() {
        assert!(ConversationMode::Onboarding
            .prompt_context(None)
            .is_empty());
    }

    #[test]
    fn chef_context_is_profile_block() {
        let p = profile();
        let block = ConversationMode::Chef.prompt_context(Some(&p));
        assert!(block.contains("Name: Ben (Ben Okafor)"));
    }

    #[test]
    fn recipe_context_includes_recipe_and_profile() {
        let recipe = RecipeContext::new(
            "Jollof Rice",
            4,
            45,
            vec!["rice".to_string()],
            vec!["Blend the base".to_string()],
        );
        let p = profile();
        let mode = ConversationMode::Recipe { recipe };
        let block = mode.prompt_context(Some(&p));
        assert!(block.contains("# Jollof Rice (Serves 4)"));
        assert!(block.contains("Name: Ben"));
    }
}
