use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL mapping, the sole persistent entity.
///
/// `created_at` is set once at creation and never changes; `hit_count`
/// starts at zero and only moves through the store's atomic increment.
/// The wire shape uses camelCase field names to match the durable
/// record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMapping {
    /// The unique short code, primary key of the record.
    pub short_code: ShortCode,
    /// The redirect target.
    pub original_url: String,
    /// The host under which the short code is served.
    pub domain: String,
    /// Creation time, immutable.
    pub created_at: Timestamp,
    /// Number of successful resolutions, monotonically non-decreasing.
    pub hit_count: u64,
}

impl UrlMapping {
    /// Creates a fresh mapping with `created_at` = now and a zero hit count.
    pub fn new(
        short_code: ShortCode,
        original_url: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
            domain: domain.into(),
            created_at: Timestamp::now(),
            hit_count: 0,
        }
    }
}
