use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, ArgGroup, Parser};
use color_eyre::eyre::{eyre, WrapErr};
use steamrev_api::{fetch_game_details, resolve_app_id, ReviewSort, SteamReviewSource};
use steamrev_core::{
    acquire_reviews, save_reviews, save_split_by_language, AcquireOptions, ReviewStats,
    SaveFormat, StopReason,
};
use tracing::{info, warn};

mod logging;
mod output;

const PAGE_SIZE: u32 = 100;
const PAGE_DELAY: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "steamrev")]
#[command(about = "Fetch Steam reviews for a game and save them to disk")]
#[command(version)]
#[command(group(ArgGroup::new("target").required(true).args(["appid", "game"])))]
struct Cli {
    /// Steam App ID (e.g. 440)
    #[arg(long)]
    appid: Option<String>,

    /// Game name, resolved to an App ID via the Steam app list (e.g. "Team Fortress 2")
    #[arg(long)]
    game: Option<String>,

    /// Maximum number of reviews to fetch (0 = unlimited)
    #[arg(long, default_value_t = 100)]
    max: usize,

    /// Languages to fetch, comma separated; "all" fetches every language
    #[arg(long, default_value = "japanese")]
    lang: String,

    /// Output directory
    #[arg(long, default_value = "output", value_name = "DIR")]
    output: PathBuf,

    /// Review ordering: recent (creation time), updated (last update),
    /// anything else sorts by helpfulness
    #[arg(long, default_value = "all")]
    sort: String,

    /// Write one file per language in addition to the aggregate
    #[arg(long, action = ArgAction::SetTrue)]
    split: bool,

    /// Save as JSON instead of plain text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Also fetch game metadata from the store details endpoint
    #[arg(long, action = ArgAction::SetTrue)]
    details: bool,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| eyre!("{}", e))?;
    let out = output::Output::new(cli.quiet);

    let languages = parse_languages(&cli.lang);
    let sort = ReviewSort::parse(&cli.sort);
    let format = if cli.json {
        SaveFormat::Json
    } else {
        SaveFormat::Text
    };

    fs::create_dir_all(&cli.output)
        .wrap_err_with(|| format!("failed to create output directory {}", cli.output.display()))?;

    let client = reqwest::Client::new();

    // Resolve the target app and a display name for the stats report.
    let (app_id, game_label) = match (&cli.appid, &cli.game) {
        (Some(appid), _) => (appid.clone(), format!("App ID {}", appid)),
        (None, Some(game)) => {
            info!(game, "resolving app id from game name");
            let app_id = resolve_app_id(&client, game).await?;
            info!(game, app_id, "resolved app id");
            (app_id, game.clone())
        }
        (None, None) => unreachable!("clap enforces the target group"),
    };

    let source = SteamReviewSource::new(
        client.clone(),
        app_id.clone(),
        PAGE_SIZE,
        sort,
        languages.clone(),
    );
    let options = AcquireOptions {
        max_reviews: cli.max,
        languages,
        page_delay: PAGE_DELAY,
    };

    let acquisition = acquire_reviews(&source, &options).await?;
    match acquisition.stop {
        StopReason::Truncated => info!(
            count = acquisition.reviews.len(),
            "stopped at the requested maximum"
        ),
        StopReason::Exhausted => info!(
            count = acquisition.reviews.len(),
            pages = acquisition.pages_fetched,
            "fetched the full corpus"
        ),
    }

    if acquisition.reviews.is_empty() {
        out.warn("No reviews found");
        return Ok(());
    }

    // Game metadata is optional; a failure here never discards the reviews.
    let game_details = if cli.details {
        match fetch_game_details(&client, &app_id).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!(error = %e, "failed to fetch game details, continuing without them");
                None
            }
        }
    } else {
        None
    };

    // The storage layer reports anyhow errors; bridge them into eyre the
    // same way init_logging is bridged above.
    let base_stem = format!("steam_reviews_{}", app_id);
    let saved = if cli.split {
        save_split_by_language(
            &acquisition.reviews,
            &cli.output,
            &base_stem,
            format,
            game_details.as_ref(),
        )
        .map_err(|e| eyre!("{e:#}"))?
    } else {
        let path = cli
            .output
            .join(format!("{}{}", base_stem, format.extension()));
        vec![save_reviews(
            &acquisition.reviews,
            &path,
            format,
            game_details.as_ref(),
        )
        .map_err(|e| eyre!("{e:#}"))?]
    };

    out.println("\n=== Saved files ===");
    for file in &saved {
        out.println(format!("- {}", file.display()));
    }
    out.success(format!("Saved {} reviews", acquisition.reviews.len()));

    let stats = ReviewStats::collect(&acquisition.reviews);
    out.println(stats.render(&game_label));

    Ok(())
}

/// Split a comma-separated language list, dropping empty entries.
fn parse_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anyhow_errors_bridge_into_eyre_reports() {
        // Storage failures arrive as anyhow errors; the chain must survive
        // the conversion into the eyre report main returns.
        let err = anyhow::anyhow!("disk full").context("failed to save reviews");
        let report = eyre!("{err:#}");
        assert!(report.to_string().contains("failed to save reviews"));
        assert!(report.to_string().contains("disk full"));
    }

    #[test]
    fn languages_are_split_and_trimmed() {
        assert_eq!(
            parse_languages("japanese, english ,,schinese"),
            vec!["japanese", "english", "schinese"]
        );
        assert!(parse_languages("").is_empty());
        assert!(parse_languages(" , ").is_empty());
    }
}
