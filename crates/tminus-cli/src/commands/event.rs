//! Event management commands for CLI.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use tminus_core::image::ImageUpload;
use tminus_core::oracle::{self, policy};
use tminus_core::timezone;
use tminus_core::{Config, EventDraft};

use super::{default_timezone, find_event, format_remaining, open_book, CliResult, EventView};

#[derive(Subcommand)]
pub enum EventAction {
    /// Create a new countdown
    Add {
        /// Event title
        title: Option<String>,
        /// Target date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Target time, HH:MM (24-hour)
        #[arg(long)]
        time: Option<String>,
        /// Timezone identifier (see `tminus timezones`)
        #[arg(long)]
        timezone: Option<String>,
        /// Category label; picked automatically when omitted
        #[arg(long)]
        category: Option<String>,
        /// Background image file
        #[arg(long)]
        image: Option<PathBuf>,
        /// Fill missing fields from the background image
        #[arg(long, requires = "image")]
        scan: bool,
    },
    /// Edit an existing countdown
    Edit {
        /// Event ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// New time, HH:MM
        #[arg(long)]
        time: Option<String>,
        /// New timezone identifier
        #[arg(long)]
        timezone: Option<String>,
        /// New category label
        #[arg(long)]
        category: Option<String>,
        /// Replace the background image
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<PathBuf>,
        /// Remove the background image
        #[arg(long)]
        clear_image: bool,
    },
    /// Delete a countdown
    Rm {
        /// Event ID
        id: String,
    },
    /// List countdowns, soonest first
    List {
        /// Only events in this category
        #[arg(long)]
        category: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one countdown
    Show {
        /// Event ID
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move a countdown to another category
    SetCategory {
        /// Event ID
        id: String,
        /// Category label
        category: String,
    },
}

fn load_image(path: &Path, config: &Config) -> Result<ImageUpload, Box<dyn std::error::Error>> {
    Ok(ImageUpload::read(path, config.upload.max_image_bytes)?)
}

pub async fn run(action: EventAction) -> CliResult {
    let now = Utc::now();
    let config = Config::load()?;
    let mut book = open_book(now)?;

    match action {
        EventAction::Add {
            title,
            date,
            time,
            timezone,
            category,
            image,
            scan,
        } => {
            let upload = image.map(|p| load_image(&p, &config)).transpose()?;
            let mut draft = EventDraft {
                timezone: default_timezone(&config),
                background_image: upload.as_ref().map(ImageUpload::to_data_url),
                category,
                ..Default::default()
            };

            let oracle = oracle::from_config(&config.oracle);
            if let (true, Some(upload)) = (scan, upload.as_ref()) {
                let fields = policy::extract(oracle.as_ref(), upload).await;
                draft.merge_extracted(&fields);
            }
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(time) = time {
                draft.time = time;
            }
            if let Some(tz) = timezone {
                draft.timezone = tz;
            }
            draft.validate()?;

            if draft.category.is_none() {
                let labels = book.categories().labels().to_vec();
                let picked = policy::categorize(oracle.as_ref(), &draft.title, &labels).await;
                draft.category = Some(picked);
            }

            let event = book.create(draft, now)?;
            println!("Event created: {}", event.id);
            println!("{}", serde_json::to_string_pretty(&EventView::new(event, now))?);
        }
        EventAction::Edit {
            id,
            title,
            date,
            time,
            timezone,
            category,
            image,
            clear_image,
        } => {
            let existing = find_event(&book, &id)?;
            let mut draft = EventDraft::from_event(existing);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(time) = time {
                draft.time = time;
            }
            if let Some(tz) = timezone {
                draft.timezone = tz;
            }
            if let Some(path) = image {
                draft.background_image = Some(load_image(&path, &config)?.to_data_url());
            }
            if clear_image {
                draft.background_image = None;
            }
            draft.validate()?;

            match category {
                Some(category) => draft.category = Some(category),
                None if policy::needs_categorization(Some(existing), &draft.title) => {
                    let labels = book.categories().labels().to_vec();
                    let oracle = oracle::from_config(&config.oracle);
                    let picked = policy::categorize(oracle.as_ref(), &draft.title, &labels).await;
                    draft.category = Some(picked);
                }
                None => {}
            }

            let event = book.edit(&id, draft)?;
            println!("Event updated: {}", event.id);
        }
        EventAction::Rm { id } => {
            let removed = book.delete(&id)?;
            println!("Event deleted: {} ({})", removed.id, removed.title);
        }
        EventAction::List { category, json } => {
            let events: Vec<_> = book
                .filtered(category.as_deref())
                .map(|e| EventView::new(e, now))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else if events.is_empty() {
                println!("No countdowns yet.");
            } else {
                for view in &events {
                    println!(
                        "{}  {:<24}  {:<12}  {}",
                        view.event.id,
                        view.event.title,
                        view.event.category.as_deref().unwrap_or("-"),
                        format_remaining(&view.countdown),
                    );
                }
            }
        }
        EventAction::Show { id, json } => {
            let event = find_event(&book, &id)?;
            let view = EventView::new(event, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{}", event.title);
                println!("  id:        {}", event.id);
                println!("  when:      {} {}", event.date, event.time);
                println!("  timezone:  {}", timezone::display_label(&event.timezone));
                println!("  target:    {}", view.countdown.target.to_rfc3339());
                println!("  category:  {}", event.category.as_deref().unwrap_or("-"));
                println!("  remaining: {}", format_remaining(&view.countdown));
                println!("  progress:  {:.1}%", view.countdown.progress);
            }
        }
        EventAction::SetCategory { id, category } => {
            let event = book.set_category(&id, &category)?;
            println!("Event {} moved to {}", event.id, category);
        }
    }
    Ok(())
}
