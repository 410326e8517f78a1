use std::collections::BTreeMap;
use std::fmt::Write;

use steamrev_models::ReviewRecord;

#[derive(Debug, Default, Clone)]
pub struct LanguageStats {
    pub count: usize,
    pub positive: usize,
}

/// Aggregate up/down-vote and per-language counts over a review set.
#[derive(Debug, Default)]
pub struct ReviewStats {
    pub total: usize,
    pub positive: usize,
    // BTreeMap keeps the per-language report deterministic.
    pub by_language: BTreeMap<String, LanguageStats>,
}

impl ReviewStats {
    pub fn collect(reviews: &[ReviewRecord]) -> Self {
        let mut stats = ReviewStats {
            total: reviews.len(),
            ..Default::default()
        };
        for review in reviews {
            let lang = if review.language.is_empty() {
                "unknown"
            } else {
                &review.language
            };
            let entry = stats.by_language.entry(lang.to_string()).or_default();
            entry.count += 1;
            if review.voted_up {
                stats.positive += 1;
                entry.positive += 1;
            }
        }
        stats
    }

    pub fn negative(&self) -> usize {
        self.total - self.positive
    }

    /// Plain-text report, suitable for printing after a run.
    pub fn render(&self, game_name: &str) -> String {
        if self.total == 0 {
            return "No reviews found\n".to_string();
        }

        let positive_pct = self.positive as f64 / self.total as f64 * 100.0;
        let negative_pct = self.negative() as f64 / self.total as f64 * 100.0;

        let mut out = String::new();
        let _ = writeln!(out, "\n=== Review statistics ===");
        let _ = writeln!(out, "Game: {}", game_name);
        let _ = writeln!(out, "Total reviews: {}", self.total);
        let _ = writeln!(out, "Positive: {} ({:.1}%)", self.positive, positive_pct);
        let _ = writeln!(out, "Negative: {} ({:.1}%)", self.negative(), negative_pct);

        let _ = writeln!(out, "\nPer-language breakdown:");
        for (lang, entry) in &self.by_language {
            let share = entry.count as f64 / self.total as f64 * 100.0;
            let positive_rate = entry.positive as f64 / entry.count as f64 * 100.0;
            let _ = writeln!(
                out,
                "  {}: {} ({:.1}%) - positive: {} ({:.1}%), negative: {}",
                lang,
                entry.count,
                share,
                entry.positive,
                positive_rate,
                entry.count - entry.positive
            );
        }
        out
    }
}
