pub mod appdetails;
pub mod applist;
pub mod error;
pub mod language;
pub mod reviews;
pub mod traits;

pub use appdetails::fetch_game_details;
pub use applist::resolve_app_id;
pub use error::SteamError;
pub use language::{language_query_value, LanguageFilter};
pub use reviews::{fetch_review_page, ReviewSort, SteamReviewSource};
pub use traits::ReviewSource;
