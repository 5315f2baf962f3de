use std::path::PathBuf;

use tabled::Table;

use crate::{
    config, error, info, success,
    types::SongTableRow,
    utils,
    vision::extract::{extract_songs, load_image, render_song_list},
};

/// Reads the songs off a playlist screenshot and writes them as a numbered
/// list ready for `spotgrab convert`.
pub async fn extract(image: PathBuf, output: PathBuf) {
    let api_key = match config::openai_api_key() {
        Ok(key) => key,
        Err(e) => error!("{}", e),
    };

    if !image.is_file() {
        error!("Image not found: {}", image.display());
    }

    let image_url = match load_image(&image).await {
        Ok(url) => url,
        Err(e) => error!("Cannot read {}: {}", image.display(), e),
    };

    let pb = utils::spinner("Analyzing image...");
    let songs = match extract_songs(
        &config::openai_apiurl(),
        &api_key,
        &config::openai_model(),
        &image_url,
    )
    .await
    {
        Ok(songs) => {
            pb.finish_and_clear();
            songs
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to process image: {}", e)
        }
    };

    let rows: Vec<SongTableRow> = songs
        .iter()
        .enumerate()
        .map(|(index, song)| SongTableRow {
            number: index + 1,
            title: song.title.clone(),
            artist: song.artist.clone().unwrap_or_default(),
        })
        .collect();
    println!("{}", Table::new(rows));

    if let Err(e) = async_fs::write(&output, render_song_list(&songs)).await {
        error!("Cannot write {}: {}", output.display(), e);
    }

    success!("Extracted {} songs", songs.len());
    info!("Review {} before converting it", output.display());
}
