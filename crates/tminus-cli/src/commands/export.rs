use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use tminus_core::export::{google_calendar_url, ics_content, ics_filename, ICS_MIME_TYPE};

use super::{find_event, open_book, CliResult};

#[derive(Subcommand)]
pub enum ExportAction {
    /// Print an "add to Google Calendar" link
    Google {
        /// Event ID
        id: String,
    },
    /// Write a one-event .ics file
    Ics {
        /// Event ID
        id: String,
        /// Directory to write into (default: current directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the written file as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ExportAction) -> CliResult {
    let now = Utc::now();
    let book = open_book(now)?;

    match action {
        ExportAction::Google { id } => {
            let event = find_event(&book, &id)?;
            println!("{}", google_calendar_url(&event.title, event.target()));
        }
        ExportAction::Ics { id, out, json } => {
            let event = find_event(&book, &id)?;
            let path = out
                .unwrap_or_else(|| PathBuf::from("."))
                .join(ics_filename(&event.title));
            std::fs::write(&path, ics_content(&event.title, event.target(), now))?;
            if json {
                let written = json!({
                    "path": path.display().to_string(),
                    "mimeType": ICS_MIME_TYPE,
                });
                println!("{}", serde_json::to_string_pretty(&written)?);
            } else {
                println!("Wrote {} ({ICS_MIME_TYPE})", path.display());
            }
        }
    }
    Ok(())
}
