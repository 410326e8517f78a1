use async_trait::async_trait;
use steamrev_models::ReviewPage;

use crate::error::SteamError;

/// One-page review fetching behind an opaque cursor.
///
/// The acquisition engine drives this trait; the production implementation is
/// [`crate::SteamReviewSource`], tests substitute scripted stubs.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch_page(&self, cursor: &str) -> Result<ReviewPage, SteamError>;
}
