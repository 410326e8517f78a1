pub mod game;
pub mod review;
pub mod score;

pub use game::{AppDetailsEnvelope, GameDetails};
pub use review::{AuthorRecord, QuerySummary, ReviewPage, ReviewRecord, SteamAuthor, SteamReview};
pub use score::normalize_score;
