use async_trait::async_trait;
use reqwest::Client;
use steamrev_models::ReviewPage;
use tracing::debug;

use crate::error::SteamError;
use crate::language::language_query_value;
use crate::traits::ReviewSource;

const APPREVIEWS_BASE: &str = "https://store.steampowered.com/appreviews";

/// Ordering mode of the appreviews endpoint.
///
/// `day_range` only matters for helpfulness ordering, where 365 is the
/// maximum window the server accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewSort {
    Helpfulness,
    Recent,
    Updated,
}

impl ReviewSort {
    /// Anything that is not `recent` or `updated` falls back to helpfulness
    /// ordering.
    pub fn parse(s: &str) -> Self {
        match s {
            "recent" => ReviewSort::Recent,
            "updated" => ReviewSort::Updated,
            _ => ReviewSort::Helpfulness,
        }
    }

    fn query_params(self) -> (&'static str, &'static str) {
        match self {
            ReviewSort::Recent => ("recent", "0"),
            ReviewSort::Updated => ("updated", "0"),
            ReviewSort::Helpfulness => ("all", "365"),
        }
    }
}

/// Fetch one page of reviews for `app_id` at the given cursor.
///
/// Validates the transport status and the envelope's own success flag; any
/// failure aborts this page with no retry.
pub async fn fetch_review_page(
    client: &Client,
    app_id: &str,
    cursor: &str,
    page_size: u32,
    sort: ReviewSort,
    languages: &[String],
) -> Result<ReviewPage, SteamError> {
    let url = format!("{}/{}", APPREVIEWS_BASE, app_id);
    let (filter, day_range) = sort.query_params();
    let page_size = page_size.to_string();
    let language = language_query_value(languages);

    let response = client
        .get(&url)
        .query(&[
            ("json", "1"),
            ("cursor", cursor),
            ("num_per_page", page_size.as_str()),
            ("review_type", "all"),
            ("purchase_type", "all"),
            ("language", language.as_str()),
            ("filter", filter),
            ("day_range", day_range),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SteamError::Status(status));
    }

    let body = response.text().await?;
    let page = validate_envelope(serde_json::from_str(&body)?)?;

    debug!(
        app_id,
        reviews = page.reviews.len(),
        cursor = %page.cursor,
        "fetched review page"
    );
    Ok(page)
}

/// A well-formed envelope can still report its own failure.
fn validate_envelope(page: ReviewPage) -> Result<ReviewPage, SteamError> {
    if page.success != 1 {
        return Err(SteamError::Api {
            success: page.success,
        });
    }
    Ok(page)
}

/// Production [`ReviewSource`]: binds a client and the per-run query settings
/// so the engine only has to supply the cursor.
pub struct SteamReviewSource {
    client: Client,
    app_id: String,
    page_size: u32,
    sort: ReviewSort,
    languages: Vec<String>,
}

impl SteamReviewSource {
    pub fn new(
        client: Client,
        app_id: impl Into<String>,
        page_size: u32,
        sort: ReviewSort,
        languages: Vec<String>,
    ) -> Self {
        Self {
            client,
            app_id: app_id.into(),
            page_size,
            sort,
            languages,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

#[async_trait]
impl ReviewSource for SteamReviewSource {
    async fn fetch_page(&self, cursor: &str) -> Result<ReviewPage, SteamError> {
        fetch_review_page(
            &self.client,
            &self.app_id,
            cursor,
            self.page_size,
            self.sort,
            &self.languages,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parsing_defaults_to_helpfulness() {
        assert_eq!(ReviewSort::parse("recent"), ReviewSort::Recent);
        assert_eq!(ReviewSort::parse("updated"), ReviewSort::Updated);
        assert_eq!(ReviewSort::parse("all"), ReviewSort::Helpfulness);
        assert_eq!(ReviewSort::parse("helpful"), ReviewSort::Helpfulness);
        assert_eq!(ReviewSort::parse(""), ReviewSort::Helpfulness);
    }

    #[test]
    fn sort_query_params_follow_mode() {
        assert_eq!(ReviewSort::Recent.query_params(), ("recent", "0"));
        assert_eq!(ReviewSort::Updated.query_params(), ("updated", "0"));
        assert_eq!(ReviewSort::Helpfulness.query_params(), ("all", "365"));
    }

    #[test]
    fn envelope_failure_is_api_error() {
        let page: ReviewPage = serde_json::from_value(serde_json::json!({
            "success": 2,
            "reviews": [],
            "cursor": ""
        }))
        .unwrap();
        let err = validate_envelope(page).unwrap_err();
        assert!(matches!(err, SteamError::Api { success: 2 }));
    }

    #[test]
    fn successful_envelope_passes_validation() {
        let page: ReviewPage = serde_json::from_value(serde_json::json!({
            "success": 1,
            "reviews": [],
            "cursor": "*"
        }))
        .unwrap();
        let page = validate_envelope(page).unwrap();
        assert_eq!(page.cursor, "*");
    }
}
