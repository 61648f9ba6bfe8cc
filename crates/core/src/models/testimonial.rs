//! Customer testimonials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::TestimonialId;

/// A customer review shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub customer_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub review: String,
    pub image_url: Option<String>,
    pub verified: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert schema for a testimonial.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, message = "Review is required"))]
    pub review: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "super::default_true")]
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
}

impl NewTestimonial {
    /// Build the stored record under an assigned id.
    #[must_use]
    pub fn into_record(self, id: TestimonialId, created_at: DateTime<Utc>) -> Testimonial {
        Testimonial {
            id,
            customer_name: self.customer_name,
            rating: self.rating,
            review: self.review,
            image_url: self.image_url,
            verified: self.verified,
            featured: self.featured,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_verified_not_featured() {
        let new: NewTestimonial =
            serde_json::from_value(json!({"customerName": "Sara C.", "rating": 5, "review": "Ottimo"}))
                .unwrap();
        assert!(new.verified);
        assert!(!new.featured);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn test_rating_out_of_range() {
        for rating in [0, 6] {
            let new: NewTestimonial = serde_json::from_value(
                json!({"customerName": "Sara C.", "rating": rating, "review": "Ottimo"}),
            )
            .unwrap();
            assert!(new.validate().is_err(), "rating {rating} should be rejected");
        }
    }
}
