//! Reviews Data

use std::ops::RangeInclusive;

use crate::domain::reviews::records::ReviewUuid;

/// Accepted review rates.
pub const RATE_RANGE: RangeInclusive<u8> = 1..=5;

/// New Review Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub author: String,
    pub email: String,
    pub text: String,
    pub rate: u8,
}

impl NewReview {
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        email: impl Into<String>,
        text: impl Into<String>,
        rate: u8,
    ) -> Self {
        Self {
            uuid: ReviewUuid::new(),
            author: author.into(),
            email: email.into(),
            text: text.into(),
            rate,
        }
    }
}
