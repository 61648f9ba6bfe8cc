//! Newsletter subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Email, NewsletterId};

/// A newsletter subscription. One per normalised email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsletter {
    pub id: NewsletterId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/newsletter/subscribe`.
///
/// The email is optional here so a missing field can be reported with a
/// dedicated message instead of a generic deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<String>,
}
