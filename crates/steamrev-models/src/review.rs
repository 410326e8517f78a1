use serde::{Deserialize, Serialize};

use crate::score;

/// One page of the Steam appreviews endpoint.
///
/// `query_summary` counts are advisory only; pagination termination is driven
/// by the `reviews` list and the cursor, never by `num_reviews`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewPage {
    pub success: i64,
    #[serde(default)]
    pub query_summary: QuerySummary,
    #[serde(default)]
    pub reviews: Vec<SteamReview>,
    #[serde(default)]
    pub cursor: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuerySummary {
    #[serde(default)]
    pub num_reviews: i64,
    #[serde(default)]
    pub review_score: i64,
    #[serde(default)]
    pub review_score_desc: String,
    #[serde(default)]
    pub total_positive: i64,
    #[serde(default)]
    pub total_negative: i64,
    #[serde(default)]
    pub total_reviews: i64,
}

/// Server-native review shape, decoded verbatim from the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct SteamReview {
    pub recommendationid: String,
    #[serde(default)]
    pub author: SteamAuthor,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub timestamp_created: i64,
    #[serde(default)]
    pub timestamp_updated: i64,
    #[serde(default)]
    pub voted_up: bool,
    #[serde(default)]
    pub votes_up: i64,
    #[serde(default)]
    pub votes_funny: i64,
    // Number, numeric string, or empty string on the wire.
    #[serde(default, deserialize_with = "score::deserialize")]
    pub weighted_vote_score: f64,
    #[serde(default)]
    pub comment_count: i64,
    #[serde(default)]
    pub steam_purchase: bool,
    #[serde(default)]
    pub received_for_free: bool,
    #[serde(default)]
    pub written_during_early_access: bool,
    #[serde(default)]
    pub developer_response: String,
    #[serde(default)]
    pub timestamp_dev_responded: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SteamAuthor {
    #[serde(default)]
    pub steamid: String,
    #[serde(default)]
    pub num_games_owned: i64,
    #[serde(default)]
    pub num_reviews: i64,
    #[serde(default)]
    pub playtime_forever: i64,
    #[serde(default)]
    pub playtime_last_two_weeks: i64,
    #[serde(default)]
    pub playtime_at_review: i64,
    #[serde(default)]
    pub last_played: i64,
}

/// Canonical review record used by everything downstream of acquisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub recommendation_id: String,
    pub author: AuthorRecord,
    pub language: String,
    pub review: String,
    pub timestamp_created: i64,
    pub timestamp_updated: i64,
    pub voted_up: bool,
    pub votes_up: i64,
    pub votes_funny: i64,
    pub weighted_vote_score: f64,
    pub comment_count: i64,
    pub steam_purchase: bool,
    pub received_for_free: bool,
    pub written_during_early_access: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub developer_response: String,
    // 0 means the developer never responded.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub timestamp_dev_responded: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub steam_id: String,
    pub num_games_owned: i64,
    pub num_reviews: i64,
    pub playtime_forever: i64,
    pub playtime_last_two_weeks: i64,
    pub playtime_at_review: i64,
    pub last_played: i64,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl From<SteamReview> for ReviewRecord {
    /// Pure field-for-field conversion; the weighted score was already
    /// normalized during decode.
    fn from(sr: SteamReview) -> Self {
        ReviewRecord {
            recommendation_id: sr.recommendationid,
            author: AuthorRecord {
                steam_id: sr.author.steamid,
                num_games_owned: sr.author.num_games_owned,
                num_reviews: sr.author.num_reviews,
                playtime_forever: sr.author.playtime_forever,
                playtime_last_two_weeks: sr.author.playtime_last_two_weeks,
                playtime_at_review: sr.author.playtime_at_review,
                last_played: sr.author.last_played,
            },
            language: sr.language,
            review: sr.review,
            timestamp_created: sr.timestamp_created,
            timestamp_updated: sr.timestamp_updated,
            voted_up: sr.voted_up,
            votes_up: sr.votes_up,
            votes_funny: sr.votes_funny,
            weighted_vote_score: sr.weighted_vote_score,
            comment_count: sr.comment_count,
            steam_purchase: sr.steam_purchase,
            received_for_free: sr.received_for_free,
            written_during_early_access: sr.written_during_early_access,
            developer_response: sr.developer_response,
            timestamp_dev_responded: sr.timestamp_dev_responded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_review() -> SteamReview {
        serde_json::from_value(serde_json::json!({
            "recommendationid": "123456",
            "author": {
                "steamid": "76561198000000000",
                "num_games_owned": 42,
                "num_reviews": 7,
                "playtime_forever": 1200,
                "playtime_last_two_weeks": 30,
                "playtime_at_review": 900,
                "last_played": 1700000000i64
            },
            "language": "japanese",
            "review": "とても面白い",
            "timestamp_created": 1690000000i64,
            "timestamp_updated": 0,
            "voted_up": true,
            "votes_up": 10,
            "votes_funny": 2,
            "weighted_vote_score": "0.65",
            "comment_count": 1,
            "steam_purchase": true,
            "received_for_free": false,
            "written_during_early_access": false,
            "developer_response": "",
            "timestamp_dev_responded": 0
        }))
        .unwrap()
    }

    #[test]
    fn conversion_copies_every_field() {
        let record: ReviewRecord = sample_review().into();
        assert_eq!(record.recommendation_id, "123456");
        assert_eq!(record.author.steam_id, "76561198000000000");
        assert_eq!(record.author.playtime_at_review, 900);
        assert_eq!(record.language, "japanese");
        assert_eq!(record.weighted_vote_score, 0.65);
        assert!(record.voted_up);
        assert_eq!(record.timestamp_dev_responded, 0);
    }

    #[test]
    fn conversion_is_idempotent() {
        let a: ReviewRecord = sample_review().into();
        let b: ReviewRecord = sample_review().into();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_developer_response_is_omitted_from_json() {
        let record: ReviewRecord = sample_review().into();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("developer_response").is_none());
        assert!(json.get("timestamp_dev_responded").is_none());
    }

    #[test]
    fn present_developer_response_is_serialized() {
        let mut review = sample_review();
        review.developer_response = "Thanks for the report".to_string();
        review.timestamp_dev_responded = 1695000000;
        let record: ReviewRecord = review.into();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["developer_response"], "Thanks for the report");
        assert_eq!(json["timestamp_dev_responded"], 1695000000i64);
    }

    #[test]
    fn page_decodes_with_numeric_score_variant() {
        let page: ReviewPage = serde_json::from_value(serde_json::json!({
            "success": 1,
            "query_summary": {"num_reviews": 1, "total_reviews": 100},
            "reviews": [{
                "recommendationid": "9",
                "weighted_vote_score": 0.9
            }],
            "cursor": "AoJ4nexthing=="
        }))
        .unwrap();
        assert_eq!(page.success, 1);
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.reviews[0].weighted_vote_score, 0.9);
        assert_eq!(page.cursor, "AoJ4nexthing==");
    }
}
