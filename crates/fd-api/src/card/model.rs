use fd_db::models::Card;
use serde::Deserialize;
use validator::Validate;

use crate::validation::ValidatePayload;

pub const CARD_NOT_FOUND: &str = "No card found";
pub const NOT_YOUR_CARD: &str = "This is not your card! Go make your own card.";

/// Payload for `POST /cards`
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCard {
    #[validate(required(message = "Missing data for required field."))]
    pub deck_id: Option<i64>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, max = 500, message = "Front must be between 1 and 500 characters.")
    )]
    pub front: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, max = 500, message = "Back must be between 1 and 500 characters.")
    )]
    pub back: Option<String>,
}

impl ValidatePayload for CreateCard {}

/// Payload for `PUT /cards/{id}`. A card cannot move between decks.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CardPatch {
    #[validate(length(min = 1, max = 500, message = "Front must be between 1 and 500 characters."))]
    pub front: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Back must be between 1 and 500 characters."))]
    pub back: Option<String>,
}

impl ValidatePayload for CardPatch {}

impl CardPatch {
    pub fn apply(self, card: &mut Card) {
        if let Some(front) = self.front {
            card.front = front;
        }
        if let Some(back) = self.back {
            card.back = back;
        }
    }
}
