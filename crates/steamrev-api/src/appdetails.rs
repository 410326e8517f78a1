use std::collections::HashMap;

use reqwest::Client;
use steamrev_models::{AppDetailsEnvelope, GameDetails};
use tracing::debug;

use crate::error::SteamError;

const APPDETAILS_URL: &str = "https://store.steampowered.com/api/appdetails";

/// Fetch game metadata for `app_id` from the store details endpoint.
///
/// The response is a one-entry map keyed by the app id, with its own success
/// flag. Callers treat this data as optional; a failure here must not discard
/// reviews that were already fetched.
pub async fn fetch_game_details(client: &Client, app_id: &str) -> Result<GameDetails, SteamError> {
    let response = client
        .get(APPDETAILS_URL)
        .query(&[("appids", app_id)])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SteamError::Status(status));
    }

    let body = response.text().await?;
    let map: HashMap<String, AppDetailsEnvelope> = serde_json::from_str(&body)?;

    let envelope = map
        .get(app_id)
        .ok_or(SteamError::Api { success: 0 })?;
    if !envelope.success {
        return Err(SteamError::Api { success: 0 });
    }
    let data = envelope
        .data
        .clone()
        .ok_or(SteamError::Api { success: 0 })?;

    let details = GameDetails::from_data(app_id, data);
    debug!(app_id, name = %details.name, "fetched game details");
    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_map_decodes_success_entry() {
        let map: HashMap<String, AppDetailsEnvelope> = serde_json::from_value(serde_json::json!({
            "440": {
                "success": true,
                "data": {
                    "name": "Team Fortress 2",
                    "is_free": true,
                    "developers": ["Valve"],
                    "publishers": ["Valve"],
                    "release_date": {"coming_soon": false, "date": "10 Oct, 2007"}
                }
            }
        }))
        .unwrap();
        let envelope = map.get("440").unwrap();
        assert!(envelope.success);
        let data = envelope.data.clone().unwrap();
        let details = GameDetails::from_data("440", data);
        assert_eq!(details.name, "Team Fortress 2");
        assert_eq!(details.developer, vec!["Valve"]);
        assert_eq!(details.release_date, "10 Oct, 2007");
    }

    #[test]
    fn details_map_decodes_failure_entry_without_data() {
        let map: HashMap<String, AppDetailsEnvelope> = serde_json::from_value(serde_json::json!({
            "999999": {"success": false}
        }))
        .unwrap();
        let envelope = map.get("999999").unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }
}
