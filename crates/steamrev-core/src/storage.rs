use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Serialize;
use steamrev_models::{GameDetails, ReviewRecord};
use tracing::{debug, warn};

/// On-disk representation for saved review sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Text,
    Json,
}

impl SaveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SaveFormat::Text => ".txt",
            SaveFormat::Json => ".json",
        }
    }
}

#[derive(Serialize)]
struct OutputDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    game_details: Option<&'a GameDetails>,
    reviews: &'a [ReviewRecord],
}

/// Write a review set to `path` in the given format, with an optional game
/// metadata header.
pub fn save_reviews(
    reviews: &[ReviewRecord],
    path: &Path,
    format: SaveFormat,
    details: Option<&GameDetails>,
) -> Result<PathBuf> {
    let contents = match format {
        SaveFormat::Json => {
            let doc = OutputDocument {
                game_details: details,
                reviews,
            };
            let mut json = serde_json::to_string_pretty(&doc)?;
            json.push('\n');
            json
        }
        SaveFormat::Text => render_text(reviews, details),
    };
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), count = reviews.len(), "saved reviews");
    Ok(path.to_path_buf())
}

/// Write one file per review language plus an `_all_languages` aggregate.
///
/// A single language file failing to save is logged and skipped; only a
/// failing aggregate aborts. Reviews with an empty language tag are bucketed
/// as `unknown`.
pub fn save_split_by_language(
    reviews: &[ReviewRecord],
    dir: &Path,
    base_stem: &str,
    format: SaveFormat,
    details: Option<&GameDetails>,
) -> Result<Vec<PathBuf>> {
    let mut by_language: BTreeMap<&str, Vec<ReviewRecord>> = BTreeMap::new();
    for review in reviews {
        let lang = if review.language.is_empty() {
            "unknown"
        } else {
            &review.language
        };
        by_language.entry(lang).or_default().push(review.clone());
    }

    let mut saved = Vec::new();
    for (lang, lang_reviews) in &by_language {
        let path = dir.join(format!("{}_{}{}", base_stem, lang, format.extension()));
        match save_reviews(lang_reviews, &path, format, details) {
            Ok(path) => saved.push(path),
            Err(e) => warn!(language = lang, error = %e, "failed to save language file"),
        }
    }

    let summary = dir.join(format!("{}_all_languages{}", base_stem, format.extension()));
    let path = save_reviews(reviews, &summary, format, details)
        .context("failed to save the all-languages summary")?;
    saved.push(path);

    Ok(saved)
}

fn render_text(reviews: &[ReviewRecord], details: Option<&GameDetails>) -> String {
    let mut out = String::new();

    if let Some(d) = details {
        let _ = writeln!(out, "=== Game details ===");
        let _ = writeln!(out, "name: {}", d.name);
        let _ = writeln!(out, "app_id: {}", d.app_id);
        if !d.developer.is_empty() {
            let _ = writeln!(out, "developer: {}", d.developer.join(", "));
        }
        if !d.publisher.is_empty() {
            let _ = writeln!(out, "publisher: {}", d.publisher.join(", "));
        }
        let _ = writeln!(out, "release_date: {}", d.release_date);
        let _ = writeln!(out, "price: {}", d.price);
        if !d.genres.is_empty() {
            let _ = writeln!(out, "genres: {}", d.genres.join(", "));
        }
        if !d.categories.is_empty() {
            let _ = writeln!(out, "categories: {}", d.categories.join(", "));
        }
        if !d.website.is_empty() {
            let _ = writeln!(out, "website: {}", d.website);
        }
        let _ = writeln!(out, "required_age: {}", d.required_age);
        let _ = writeln!(out, "is_free: {}", d.is_free);
        let _ = writeln!(out, "retrieved_at: {}", d.retrieved_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "\n=== Reviews ===\n");
    }

    for (i, review) in reviews.iter().enumerate() {
        let _ = writeln!(out, "=== Review {} ===", i + 1);
        let _ = writeln!(out, "id: {}", review.recommendation_id);
        let _ = writeln!(out, "language: {}", review.language);
        let _ = writeln!(out, "voted_up: {}", review.voted_up);
        let _ = writeln!(out, "votes_up: {}", review.votes_up);
        let _ = writeln!(out, "votes_funny: {}", review.votes_funny);
        let _ = writeln!(out, "weighted_score: {:.2}", review.weighted_vote_score);
        let _ = writeln!(out, "steam_purchase: {}", review.steam_purchase);
        let _ = writeln!(out, "playtime_at_review: {} min", review.author.playtime_at_review);
        let _ = writeln!(out, "created_at: {}", format_timestamp(review.timestamp_created));
        if review.timestamp_updated > 0 {
            let _ = writeln!(out, "updated_at: {}", format_timestamp(review.timestamp_updated));
        }
        let _ = writeln!(out, "review:\n{}", review.review);
        if !review.developer_response.is_empty() {
            let _ = writeln!(out, "developer_response:\n{}", review.developer_response);
            if review.timestamp_dev_responded > 0 {
                let _ = writeln!(
                    out,
                    "developer_responded_at: {}",
                    format_timestamp(review.timestamp_dev_responded)
                );
            }
        }
        let _ = writeln!(out);
    }

    out
}

fn format_timestamp(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, language: &str) -> ReviewRecord {
        let raw: steamrev_models::SteamReview = serde_json::from_value(serde_json::json!({
            "recommendationid": id,
            "language": language,
            "review": "nice game",
            "voted_up": true,
            "timestamp_created": 1690000000i64,
            "weighted_vote_score": "0.5"
        }))
        .unwrap();
        raw.into()
    }

    #[test]
    fn json_output_has_reviews_and_omits_missing_details() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.json");
        save_reviews(&[record("1", "english")], &path, SaveFormat::Json, None).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(doc.get("game_details").is_none());
        assert_eq!(doc["reviews"].as_array().unwrap().len(), 1);
        assert_eq!(doc["reviews"][0]["recommendation_id"], "1");
    }

    #[test]
    fn text_output_renders_review_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.txt");
        save_reviews(&[record("42", "japanese")], &path, SaveFormat::Text, None).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("=== Review 1 ==="));
        assert!(text.contains("id: 42"));
        assert!(text.contains("language: japanese"));
        assert!(text.contains("created_at: 2023-07-22"));
        // No update and no developer response, so neither line appears.
        assert!(!text.contains("updated_at:"));
        assert!(!text.contains("developer_response:"));
    }

    #[test]
    fn split_writes_per_language_and_summary_files() {
        let dir = tempfile::tempdir().unwrap();
        let reviews = vec![
            record("1", "japanese"),
            record("2", "english"),
            record("3", ""),
        ];
        let saved = save_split_by_language(
            &reviews,
            dir.path(),
            "steam_reviews_440",
            SaveFormat::Json,
            None,
        )
        .unwrap();

        assert_eq!(saved.len(), 4);
        assert!(dir.path().join("steam_reviews_440_japanese.json").exists());
        assert!(dir.path().join("steam_reviews_440_english.json").exists());
        assert!(dir.path().join("steam_reviews_440_unknown.json").exists());
        assert!(dir.path().join("steam_reviews_440_all_languages.json").exists());
    }
}
