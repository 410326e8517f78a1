use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::SteamError;

const APPLIST_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";

#[derive(Debug, Deserialize)]
struct AppListResponse {
    applist: AppList,
}

#[derive(Debug, Deserialize)]
struct AppList {
    #[serde(default)]
    apps: Vec<AppEntry>,
}

#[derive(Debug, Deserialize)]
struct AppEntry {
    appid: i64,
    #[serde(default)]
    name: String,
}

/// Resolve a game name to its numeric app id via the full catalog listing.
///
/// Matching is exact and case-insensitive; the first hit wins.
pub async fn resolve_app_id(client: &Client, game_name: &str) -> Result<String, SteamError> {
    let response = client.get(APPLIST_URL).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SteamError::Status(status));
    }

    let body = response.text().await?;
    let listing: AppListResponse = serde_json::from_str(&body)?;
    debug!(apps = listing.applist.apps.len(), "fetched app list");

    let wanted = game_name.to_lowercase();
    for app in &listing.applist.apps {
        if app.name.to_lowercase() == wanted {
            return Ok(app.appid.to_string());
        }
    }
    Err(SteamError::AppNotFound(game_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_list_decodes() {
        let listing: AppListResponse = serde_json::from_value(serde_json::json!({
            "applist": {
                "apps": [
                    {"appid": 440, "name": "Team Fortress 2"},
                    {"appid": 570, "name": "Dota 2"}
                ]
            }
        }))
        .unwrap();
        assert_eq!(listing.applist.apps.len(), 2);
        assert_eq!(listing.applist.apps[0].appid, 440);
        assert_eq!(listing.applist.apps[1].name, "Dota 2");
    }
}
