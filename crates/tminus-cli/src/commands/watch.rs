use std::ops::ControlFlow;

use chrono::Utc;
use tminus_core::{Config, Snapshot, Ticker};

use super::{find_event, format_remaining, open_book, CliResult};

/// Print one countdown line per tick until it finishes or Ctrl-C.
pub async fn run(id: &str) -> CliResult {
    let config = Config::load()?;
    let book = open_book(Utc::now())?;
    let event = find_event(&book, id)?.clone();
    drop(book);

    println!("{} ({} {})", event.title, event.date, event.time);
    let handle = Ticker::new(config.tick_interval()).spawn(move || {
        let snapshot = Snapshot::of(&event, Utc::now());
        println!(
            "{}  {:>5.1}%",
            format_remaining(&snapshot),
            snapshot.progress
        );
        if snapshot.finished {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    tokio::select! {
        () = handle.join() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::debug!("watch interrupted");
        }
    }
    Ok(())
}
