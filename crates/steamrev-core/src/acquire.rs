use std::time::Duration;

use steamrev_api::{LanguageFilter, ReviewSource, SteamError};
use steamrev_models::ReviewRecord;
use tracing::{debug, info};

/// Caller-supplied knobs for one acquisition run.
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    /// 0 means fetch the entire review corpus.
    pub max_reviews: usize,
    /// Requested language tags; empty or containing `"all"` disables
    /// filtering.
    pub languages: Vec<String>,
    /// Fixed pause between successive page requests (rate-limit pacing).
    pub page_delay: Duration,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            max_reviews: 0,
            languages: Vec::new(),
            page_delay: Duration::from_secs(1),
        }
    }
}

/// How a successful acquisition run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The server reported no further reviews, or the cursor stopped
    /// advancing.
    Exhausted,
    /// The caller's maximum was reached, possibly mid-page.
    Truncated,
}

#[derive(Debug)]
pub struct Acquisition {
    pub reviews: Vec<ReviewRecord>,
    pub stop: StopReason,
    pub pages_fetched: usize,
}

/// Drive the review source page by page until the corpus is exhausted, the
/// cap is hit, or a fetch fails.
///
/// The run is atomic from the caller's viewpoint: any fetch failure aborts
/// the whole call and already-accumulated records are dropped with it.
/// Language filtering happens on the raw record, before conversion, so
/// rejected reviews are never converted. The append happens before the
/// non-advancing-cursor check, so records on a terminal page still count.
pub async fn acquire_reviews(
    source: &dyn ReviewSource,
    options: &AcquireOptions,
) -> Result<Acquisition, SteamError> {
    let filter = LanguageFilter::new(&options.languages);
    let mut reviews: Vec<ReviewRecord> = Vec::new();
    let mut cursor = String::from("*");
    let mut pages_fetched = 0usize;

    loop {
        debug!(accumulated = reviews.len(), cursor = %cursor, "fetching review page");
        let page = source.fetch_page(&cursor).await?;
        pages_fetched += 1;

        if page.reviews.is_empty() {
            debug!("no more reviews");
            info!(total = reviews.len(), pages = pages_fetched, "review corpus exhausted");
            return Ok(Acquisition {
                reviews,
                stop: StopReason::Exhausted,
                pages_fetched,
            });
        }

        let page_cursor = page.cursor;
        for raw in page.reviews {
            if !filter.accepts(&raw.language) {
                continue;
            }
            reviews.push(ReviewRecord::from(raw));

            if options.max_reviews > 0 && reviews.len() >= options.max_reviews {
                debug!(max = options.max_reviews, "maximum review count reached");
                reviews.truncate(options.max_reviews);
                return Ok(Acquisition {
                    reviews,
                    stop: StopReason::Truncated,
                    pages_fetched,
                });
            }
        }

        // Guard against a non-advancing server response. Only the cursor just
        // used is compared; a server cycling between two cursors would not be
        // caught.
        if page_cursor == cursor || page_cursor.is_empty() {
            debug!("cursor did not advance, stopping");
            return Ok(Acquisition {
                reviews,
                stop: StopReason::Exhausted,
                pages_fetched,
            });
        }
        cursor = page_cursor;

        tokio::time::sleep(options.page_delay).await;
    }
}
