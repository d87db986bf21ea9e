use std::path::PathBuf;

use chrono::Utc;
use tminus_core::image::ImageUpload;
use tminus_core::oracle::{self, policy};
use tminus_core::Config;

use super::{find_event, open_book, CliResult};

/// Where the picture to scan comes from.
pub enum Source {
    File(PathBuf),
    /// The background image stored on an event.
    Event(String),
}

/// Ask the oracle what event an image announces.
pub async fn run(source: Source, json: bool) -> CliResult {
    let config = Config::load()?;
    let limit = config.upload.max_image_bytes;
    let (upload, origin) = match source {
        Source::File(path) => (ImageUpload::read(&path, limit)?, path.display().to_string()),
        Source::Event(id) => {
            let book = open_book(Utc::now())?;
            let event = find_event(&book, &id)?;
            let data_url = event
                .background_image
                .as_deref()
                .ok_or_else(|| format!("event {id} has no background image"))?;
            (ImageUpload::from_data_url(data_url, limit)?, format!("event {id}"))
        }
    };

    let oracle = oracle::from_config(&config.oracle);
    let fields = policy::extract(oracle.as_ref(), &upload).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else if fields.is_empty() {
        println!("Nothing found in {origin}");
    } else {
        println!("title: {}", fields.title.as_deref().unwrap_or(""));
        println!("date:  {}", fields.date.as_deref().unwrap_or(""));
        println!("time:  {}", fields.time.as_deref().unwrap_or(""));
    }
    Ok(())
}
