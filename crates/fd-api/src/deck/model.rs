use fd_db::models::Deck;
use serde::Deserialize;
use validator::Validate;

use crate::validation::ValidatePayload;

pub const DECK_NOT_FOUND: &str = "No deck found";
pub const NOT_YOUR_DECK: &str = "This is not your deck! Go make your own deck.";

/// Payload for `POST /decks`.
///
/// The owner is never taken from the body; a `user_id` field is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDeck {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, max = 255, message = "Title must be between 1 and 255 characters.")
    )]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,
}

impl ValidatePayload for CreateDeck {}

/// Payload for `PUT /decks/{id}`: every field optional, omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DeckPatch {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters."))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,
}

impl ValidatePayload for DeckPatch {}

impl DeckPatch {
    /// Merge the supplied fields into a loaded deck.
    pub fn apply(self, deck: &mut Deck) {
        if let Some(title) = self.title {
            deck.title = title;
        }
        if let Some(description) = self.description {
            deck.description = Some(description);
        }
    }
}
