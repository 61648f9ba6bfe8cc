//! Frequently asked questions.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::FaqId;

/// A question and answer pair, listed by ascending `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: FaqId,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub order: i32,
}

/// Insert schema for a FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFaq {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl NewFaq {
    /// Build the stored record under an assigned id.
    #[must_use]
    pub fn into_record(self, id: FaqId) -> Faq {
        Faq {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            order: self.order,
        }
    }
}
