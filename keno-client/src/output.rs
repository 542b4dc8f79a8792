use colored::*;
use domain::{ArchiveEvent, ProgressEvent};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::api_client::ArchiveDownload;

const BAR_WIDTH: usize = 40;

pub fn print_event(event: &ArchiveEvent) {
    match event {
        ArchiveEvent::Progress(progress) => {
            print!("\r{}", progress_line(progress));
            let _ = std::io::stdout().flush();
        }
        ArchiveEvent::Complete(complete) => {
            println!(
                "\n{} Parsing finished, {} draws extracted",
                "✓".green(),
                complete.total.to_string().bold()
            );
        }
    }
}

// Servers may send any u8, the bar never fills past 100%.
fn progress_line(progress: &ProgressEvent) -> String {
    let percent = progress.progress.min(100) as usize;
    let filled = (percent * BAR_WIDTH) / 100;

    format!(
        "[{}{}] {:>3}% draw {}",
        "#".repeat(filled).green(),
        ".".repeat(BAR_WIDTH - filled).dimmed(),
        progress.progress,
        progress.result.draw_number.to_string().yellow()
    )
}

pub fn print_summary(download: &ArchiveDownload, output: &Path, elapsed: Duration) {
    println!("\n{}", "=== SUMMARY ===".bright_white().bold());

    let status = if download.is_complete() {
        "COMPLETE".green().bold()
    } else {
        "INCOMPLETE".red().bold()
    };

    println!("[{}] {} draws received in {:?}", status, download.draws.len(), elapsed);

    if let (Some(first), Some(last)) = (download.draws.first(), download.draws.last()) {
        println!(
            "      draws {} ({}) .. {} ({})",
            first.draw_number,
            first.date.dimmed(),
            last.draw_number,
            last.date.dimmed()
        );
    }

    println!("{} Exported to {}", "→".blue(), output.display());
}
