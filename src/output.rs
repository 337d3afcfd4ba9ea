//! Console rendering for the menu, statistics, and category listings.
//!
//! Everything user-facing that is not part of the log stream goes through
//! here, so the formatting can change in one place.

use crate::organizer::{CategoryListing, LIST_PREVIEW_LIMIT, Stats};
use colored::*;

const BANNER_WIDTH: usize = 50;

/// Stateless collection of print helpers with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints the per-run statistics banner.
    pub fn print_stats(stats: &Stats) {
        println!("\n{}", "=".repeat(BANNER_WIDTH));
        println!("{}", "ORGANIZATION STATISTICS".bold());
        println!("{}", "=".repeat(BANNER_WIDTH));
        println!(
            "Total files processed: {}",
            stats.total_files.to_string().cyan()
        );
        println!(
            "Files moved:           {}",
            stats.moved_files.to_string().green()
        );
        println!(
            "Files skipped:         {}",
            stats.skipped_files.to_string().yellow()
        );
        println!("Errors:                {}", stats.errors.to_string().red());
        println!("{}", "=".repeat(BANNER_WIDTH));
    }

    /// Prints the per-category file listings with the overcount note.
    pub fn print_listings(listings: &[CategoryListing]) {
        println!("\n{}", "FILES BY CATEGORY".bold());
        println!("{}", "=".repeat(BANNER_WIDTH));

        if listings.is_empty() {
            println!("No category folders with files yet.");
            return;
        }

        for listing in listings {
            let file_word = if listing.total == 1 { "file" } else { "files" };
            println!(
                "\n{} ({} {}):",
                listing.category.to_uppercase().bold(),
                listing.total,
                file_word
            );
            for file in &listing.files {
                println!("  - {}", file);
            }
            if listing.total > LIST_PREVIEW_LIMIT {
                println!("  ... and {} more files", listing.total - LIST_PREVIEW_LIMIT);
            }
        }
    }

    /// Prints the interactive menu.
    pub fn print_menu() {
        println!("\n{}", "=".repeat(60));
        println!("{}", "FILE ORGANIZER".bold());
        println!("{}", "=".repeat(60));
        println!("1. Organize folder");
        println!("2. Show files by category");
        println!("3. Show statistics");
        println!("4. Exit");
        println!("{}", "=".repeat(60));
    }
}
