use chrono::Utc;
use clap::Subcommand;

use super::{open_book, CliResult};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories with their event counts
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a category
    Add {
        /// Category name
        name: String,
    },
    /// Rename a category and move its events along
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Delete a category; its events move to the fallback
    Rm {
        /// Category name
        name: String,
    },
}

pub fn run(action: CategoryAction) -> CliResult {
    let mut book = open_book(Utc::now())?;

    match action {
        CategoryAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(book.categories())?);
            } else {
                for label in book.categories().labels() {
                    let count = book.filtered(Some(label.as_str())).count();
                    println!("{label} ({count})");
                }
            }
        }
        CategoryAction::Add { name } => {
            let added = book.add_category(&name)?;
            println!("Category added: {added}");
        }
        CategoryAction::Rename { old, new } => {
            let renamed = book.rename_category(&old, &new)?;
            println!("Category renamed: {old} -> {renamed}");
        }
        CategoryAction::Rm { name } => {
            let fallback = book.delete_category(&name)?;
            println!("Category deleted: {name} (events moved to {fallback})");
        }
    }
    Ok(())
}
