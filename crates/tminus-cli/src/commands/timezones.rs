use tminus_core::timezone::{self, TIMEZONES};

use super::CliResult;

pub fn run(json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(TIMEZONES)?);
        return Ok(());
    }

    let detected = timezone::detect_local_timezone();
    for tz in TIMEZONES {
        let marker = if tz.id == detected { "*" } else { " " };
        println!("{marker} {:<22} {}", tz.id, tz.label);
    }
    Ok(())
}
