use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Game metadata from the store appdetails endpoint, normalized for output.
///
/// Fetched independently of the review corpus; every consumer treats it as
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    pub app_id: String,
    pub name: String,
    pub description: String,
    pub publisher: Vec<String>,
    pub developer: Vec<String>,
    pub release_date: String,
    pub price: String,
    pub currency: String,
    pub categories: Vec<String>,
    pub genres: Vec<String>,
    pub header_image: String,
    pub website: String,
    pub required_age: i64,
    pub is_free: bool,
    pub retrieved_at: DateTime<Utc>,
}

/// One entry of the appdetails response map (keyed by app id on the wire).
#[derive(Debug, Clone, Deserialize)]
pub struct AppDetailsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppDetailsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppDetailsData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub required_age: serde_json::Value,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub about_the_game: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub header_image: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub price_overview: Option<PriceOverview>,
    #[serde(default)]
    pub release_date: ReleaseDate,
    #[serde(default)]
    pub categories: Vec<DescribedTag>,
    #[serde(default)]
    pub genres: Vec<DescribedTag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceOverview {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub final_formatted: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescribedTag {
    #[serde(default)]
    pub description: String,
}

impl GameDetails {
    /// Convert the wire envelope data into the output shape, stamping the
    /// retrieval time.
    pub fn from_data(app_id: &str, data: AppDetailsData) -> Self {
        let categories = data.categories.into_iter().map(|c| c.description).collect();
        let genres = data.genres.into_iter().map(|g| g.description).collect();

        let (price, currency) = match (&data.is_free, &data.price_overview) {
            (false, Some(p)) if !p.final_formatted.is_empty() => {
                (p.final_formatted.clone(), p.currency.clone())
            }
            _ => ("Free".to_string(), String::new()),
        };

        // Prefer the short description, fall back to longer variants.
        let description = if !data.short_description.is_empty() {
            data.short_description
        } else if !data.about_the_game.is_empty() {
            data.about_the_game
        } else {
            data.detailed_description
        };
        let description = strip_basic_html(&description);

        // Steam sends required_age as either a number or a string.
        let required_age = match &data.required_age {
            serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
            serde_json::Value::String(s) => s.parse().unwrap_or(0),
            _ => 0,
        };

        GameDetails {
            app_id: app_id.to_string(),
            name: data.name,
            description,
            publisher: data.publishers,
            developer: data.developers,
            release_date: data.release_date.date,
            price,
            currency,
            categories,
            genres,
            header_image: data.header_image,
            website: data.website,
            required_age,
            is_free: data.is_free,
            retrieved_at: Utc::now(),
        }
    }
}

fn strip_basic_html(text: &str) -> String {
    text.replace("<br>", "\n")
        .replace("<p>", "")
        .replace("</p>", "\n")
}
