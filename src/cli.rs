//! Command-line surface: argument parsing and the interactive menu.
//!
//! The menu is glue. Every operation it offers is a plain method on
//! [`Organizer`], so the core can be driven and tested without any
//! interactive input.

use crate::config::ExcludeConfig;
use crate::organizer::Organizer;
use crate::output::OutputFormatter;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Sort a folder's files into category subdirectories.
#[derive(Debug, Parser)]
#[command(name = "downsort", version, about)]
pub struct Args {
    /// Folder to organize (defaults to the user's Downloads folder)
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Simulate actions without moving any files
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Run one organization pass and exit, skipping the menu
    #[arg(short, long)]
    pub quick: bool,

    /// Path to an exclusion rules file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Builds an [`Organizer`] from parsed arguments and runs either a single
/// quick pass or the interactive menu.
pub fn run(args: Args) -> Result<(), String> {
    let target = args.folder.unwrap_or_else(default_target);

    let excludes = ExcludeConfig::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?
        .compile()
        .map_err(|e| format!("Error compiling exclusion rules: {}", e))?;

    let mut organizer = Organizer::new(target, args.dry_run).with_excludes(excludes);

    if args.quick {
        println!("Quick organizing...");
        if organizer.organize() {
            OutputFormatter::print_stats(&organizer.stats());
        }
        return Ok(());
    }

    run_menu(&mut organizer);
    Ok(())
}

/// The interactive loop. Unrecognized input re-prompts without touching any
/// state; end of input behaves like choosing exit.
fn run_menu(organizer: &mut Organizer) {
    let stdin = io::stdin();
    loop {
        OutputFormatter::print_menu();
        print!("Enter your choice (1-4): ");
        if io::stdout().flush().is_err() {
            return;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        match line.trim() {
            "1" => {
                if organizer.organize() {
                    OutputFormatter::print_stats(&organizer.stats());
                }
            }
            "2" => {
                if let Some(listings) = organizer.list_files_by_category() {
                    OutputFormatter::print_listings(&listings);
                }
            }
            "3" => OutputFormatter::print_stats(&organizer.stats()),
            "4" => {
                println!("Exiting.");
                return;
            }
            _ => OutputFormatter::error("Invalid choice! Try again."),
        }
    }
}

/// The platform download directory, falling back to `~/Downloads`, then to
/// the working directory.
fn default_target() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}
