use std::path::{Path, PathBuf};

use tabled::Table;

use crate::{
    Res, config, error, info,
    management::ResultFileManager,
    spotify, success,
    types::{Conversion, ResolvedEntry},
    utils, warning,
};

const SETUP_HINT: &str = "Get credentials from https://developer.spotify.com/dashboard:
  1. Log in and click 'Create app'
  2. Copy the Client ID and Client Secret
  3. Set SPOTIFY_API_AUTH_CLIENT_ID and SPOTIFY_API_AUTH_CLIENT_SECRET
     in your environment or in the spotgrab .env file";

pub async fn convert(input: PathBuf, output: PathBuf) -> ResultFileManager {
    let credentials = match config::spotify_credentials() {
        Ok(c) => c,
        Err(e) => error!("{}\n{}", e, SETUP_HINT),
    };

    if !input.is_file() {
        error!("Input file not found: {}", input.display());
    }

    let queries = match read_playlist(&input).await {
        Ok(queries) => queries,
        Err(e) => error!("Cannot read {}: {}", input.display(), e),
    };

    let pb = utils::spinner("Getting Spotify access token...");
    let token = match spotify::auth::client_credentials_token(
        &config::spotify_apitoken_url(),
        &credentials,
    )
    .await
    {
        Ok(token) => {
            pb.finish_and_clear();
            token
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to get token: {}", e)
        }
    };
    success!("Token obtained");

    info!("Converting {} tracks...", queries.len());
    let conversions = resolve_queries(&config::spotify_apiurl(), &token, &queries).await;

    if !conversions.is_empty() {
        println!("{}", Table::new(utils::conversion_rows(&conversions)));
    }

    let entries: Vec<ResolvedEntry> = conversions.into_iter().map(|c| c.entry).collect();
    let manager = ResultFileManager::new(output, entries);
    if let Err(e) = manager.persist().await {
        error!("Cannot write {}: {}", manager.path().display(), e);
    }

    success!(
        "Done! Converted {}/{} tracks",
        manager.found_count(),
        queries.len()
    );
    info!("Output saved to: {}", manager.path().display());

    manager
}

async fn read_playlist(path: &Path) -> Res<Vec<String>> {
    let content = async_fs::read_to_string(path).await?;
    Ok(utils::parse_queries(&content))
}

/// Resolves every query in order, one search at a time.
///
/// The result has exactly one entry per query. Queries that lose their whole
/// text to ordinal stripping are recorded as not found without a search.
pub async fn resolve_queries(api_url: &str, token: &str, queries: &[String]) -> Vec<Conversion> {
    let pb = utils::spinner("Searching...");

    let total = queries.len();
    let mut conversions = Vec::with_capacity(total);

    for (index, line) in queries.iter().enumerate() {
        let query = utils::strip_ordinal_prefix(line);
        if query.is_empty() {
            conversions.push(Conversion {
                query: line.clone(),
                entry: ResolvedEntry::NotFound {
                    query: line.clone(),
                },
                track: None,
            });
            continue;
        }

        pb.set_message(format!(
            "Searching: {query} ({current}/{total})",
            query = query,
            current = index + 1,
            total = total
        ));

        let track = match spotify::search::search_track(api_url, token, &query).await {
            Ok(track) => track,
            Err(e) => {
                pb.suspend(|| warning!("Search failed for: {} ({})", query, e));
                None
            }
        };

        let entry = match &track {
            Some(t) => ResolvedEntry::Found { url: t.url.clone() },
            None => ResolvedEntry::NotFound {
                query: query.clone(),
            },
        };

        conversions.push(Conversion {
            query,
            entry,
            track,
        });
    }

    pb.finish_and_clear();
    conversions
}
