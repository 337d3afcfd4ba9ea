//! Directory scanning, classification, and file moving.
//!
//! The [`Organizer`] owns one target directory, a category table, exclusion
//! rules, and the per-run [`Stats`]. Every operation is a plain method so
//! the core can be driven without the interactive menu.

use crate::category::{CategoryTable, file_extension};
use crate::config::CompiledExcludes;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum number of files shown per category by
/// [`Organizer::list_files_by_category`].
pub const LIST_PREVIEW_LIMIT: usize = 10;

/// Per-run counters summarizing a scan's outcome.
///
/// Reset to zero at the start of every run, once the folder check passes.
/// After any completed run, `total_files == moved_files + skipped_files +
/// errors` holds exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Eligible files seen (directories and hidden files are not counted).
    pub total_files: usize,
    /// Files moved (or, in simulate mode, that would have been moved).
    pub moved_files: usize,
    /// Files already sitting in their category folder.
    pub skipped_files: usize,
    /// Files whose move failed.
    pub errors: usize,
}

/// What a single move did, reported as a value rather than through
/// exception-style control flow.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// File moved to its category folder under its own name.
    Moved { dest: PathBuf },
    /// Destination name was taken; file moved under a timestamped name.
    Renamed { dest: PathBuf, new_name: String },
    /// Simulate mode: nothing touched, `dest` is where it would have gone.
    Simulated { dest: PathBuf },
}

/// A failed move of one file. Tallied and logged by the scan loop, never
/// propagated past it.
#[derive(Debug)]
pub struct MoveError {
    pub file: PathBuf,
    pub dest: PathBuf,
    pub reason: std::io::Error,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to move {} to {}: {}",
            self.file.display(),
            self.dest.display(),
            self.reason
        )
    }
}

impl std::error::Error for MoveError {}

/// The first files of one category folder, for display.
#[derive(Debug, Clone)]
pub struct CategoryListing {
    /// Category (and subfolder) name.
    pub category: String,
    /// At most [`LIST_PREVIEW_LIMIT`] entry names, sorted lexicographically.
    pub files: Vec<String>,
    /// Total number of entries in the folder.
    pub total: usize,
}

/// Scans one directory and moves its top-level files into category
/// subfolders.
///
/// # Examples
///
/// ```no_run
/// use downsort::organizer::Organizer;
///
/// let mut organizer = Organizer::new("/home/user/Downloads", false);
/// if organizer.organize() {
///     let stats = organizer.stats();
///     println!("moved {} of {} files", stats.moved_files, stats.total_files);
/// }
/// ```
pub struct Organizer {
    target: PathBuf,
    simulate: bool,
    table: CategoryTable,
    excludes: CompiledExcludes,
    stats: Stats,
}

impl Organizer {
    /// Creates an organizer over `target` with the standard category table.
    pub fn new(target: impl Into<PathBuf>, simulate: bool) -> Self {
        Self::with_table(target, simulate, CategoryTable::standard())
    }

    /// Creates an organizer with a caller-supplied category table.
    pub fn with_table(target: impl Into<PathBuf>, simulate: bool, table: CategoryTable) -> Self {
        Self {
            target: target.into(),
            simulate,
            table,
            excludes: CompiledExcludes::default(),
            stats: Stats::default(),
        }
    }

    /// Replaces the exclusion rules, typically with ones loaded from a
    /// config file.
    pub fn with_excludes(mut self, excludes: CompiledExcludes) -> Self {
        self.excludes = excludes;
        self
    }

    /// The directory being organized.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Snapshot of the current per-run counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Whether the target directory is usable. A plain file at the target
    /// path surfaces the same way as a missing directory; the signal is a
    /// single boolean by contract.
    pub fn check_folder(&self) -> bool {
        self.target.is_dir()
    }

    /// Runs one full scan.
    ///
    /// Returns whether the scan ran at all, not whether it ran cleanly:
    /// per-file failures are logged and tallied in [`Stats::errors`] while
    /// the scan continues with the next file. Only an unusable target
    /// directory returns `false`, in which case the stats are untouched.
    pub fn organize(&mut self) -> bool {
        if !self.check_folder() {
            tracing::error!("Folder not found: {}", self.target.display());
            return false;
        }

        tracing::info!("Starting organization of: {}", self.target.display());
        self.stats = Stats::default();
        self.ensure_category_folders();

        let entries = match fs::read_dir(&self.target) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error reading directory {}: {}", self.target.display(), e);
                return false;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();

            if path.is_dir() || name.starts_with('.') || self.excludes.is_excluded(&path) {
                continue;
            }
            self.stats.total_files += 1;

            let category = self.table.classify(file_extension(&name));
            let category_path = self.target.join(category);

            // Already in the right place. Cannot happen for a top-level
            // entry of the target itself, but the contract covers it.
            if path.parent() == Some(category_path.as_path()) {
                self.stats.skipped_files += 1;
                continue;
            }

            match self.move_file(&path, &category_path) {
                Ok(MoveOutcome::Moved { .. }) => {
                    self.stats.moved_files += 1;
                    tracing::info!("Moved: {} -> {}/", name, category);
                }
                Ok(MoveOutcome::Renamed { new_name, .. }) => {
                    self.stats.moved_files += 1;
                    tracing::info!("Moved: {} -> {}/{}", name, category, new_name);
                }
                Ok(MoveOutcome::Simulated { .. }) => {
                    self.stats.moved_files += 1;
                }
                Err(e) => {
                    self.stats.errors += 1;
                    tracing::error!("Error moving {}: {}", name, e.reason);
                }
            }
        }

        tracing::info!("File organization completed!");
        true
    }

    /// Creates one subfolder per category, in table order. Pre-existing
    /// folders are left alone. In simulate mode only the intent is logged.
    pub fn ensure_category_folders(&self) {
        for name in self.table.names() {
            let path = self.target.join(name);
            if path.exists() {
                continue;
            }
            if self.simulate {
                tracing::info!("[Simulate] Would create folder: {}", name);
            } else {
                match fs::create_dir_all(&path) {
                    Ok(()) => tracing::info!("Created folder: {}", name),
                    Err(e) => tracing::warn!("Could not create folder {}: {}", name, e),
                }
            }
        }
    }

    /// Moves `source` into `dest_folder`.
    ///
    /// When the destination name is taken, the file is renamed once with a
    /// second-resolution timestamp suffix. The renamed path is not checked
    /// again; a second collision within the same second is left to the
    /// underlying rename. In simulate mode nothing is touched and the
    /// would-be action is logged.
    pub fn move_file(
        &self,
        source: &Path,
        dest_folder: &Path,
    ) -> Result<MoveOutcome, MoveError> {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| MoveError {
                file: source.to_path_buf(),
                dest: dest_folder.to_path_buf(),
                reason: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let mut dest = dest_folder.join(&file_name);
        let mut renamed = None;
        if dest.exists() {
            let new_name = timestamped_name(&file_name);
            tracing::warn!("File exists, renaming to: {}", new_name);
            dest = dest_folder.join(&new_name);
            renamed = Some(new_name);
        }

        if self.simulate {
            tracing::info!(
                "[Simulate] Would move: {} -> {}",
                source.display(),
                dest_folder.display()
            );
            return Ok(MoveOutcome::Simulated { dest });
        }

        fs::rename(source, &dest).map_err(|e| MoveError {
            file: source.to_path_buf(),
            dest: dest.clone(),
            reason: e,
        })?;

        Ok(match renamed {
            Some(new_name) => MoveOutcome::Renamed { dest, new_name },
            None => MoveOutcome::Moved { dest },
        })
    }

    /// Lists up to [`LIST_PREVIEW_LIMIT`] entries per non-empty category
    /// folder, sorted by name for a deterministic "first 10".
    ///
    /// Read-only. Returns `None` when the target directory itself is
    /// missing.
    pub fn list_files_by_category(&self) -> Option<Vec<CategoryListing>> {
        if !self.check_folder() {
            tracing::error!("Folder not found: {}", self.target.display());
            return None;
        }

        let mut listings = Vec::new();
        for name in self.table.names() {
            let dir = self.target.join(name);
            let Ok(entries) = fs::read_dir(&dir) else {
                continue;
            };
            let mut files: Vec<String> = entries
                .flatten()
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .collect();
            if files.is_empty() {
                continue;
            }
            files.sort();
            let total = files.len();
            files.truncate(LIST_PREVIEW_LIMIT);
            listings.push(CategoryListing {
                category: name.to_string(),
                files,
                total,
            });
        }
        Some(listings)
    }
}

/// `report.pdf` becomes `report_20260830_143052.pdf`; a file without an
/// extension gets the suffix appended to its whole name.
fn timestamped_name(file_name: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    match file_name.rfind('.') {
        Some(i) if i > 0 => format!("{}_{}{}", &file_name[..i], timestamp, &file_name[i..]),
        _ => format!("{}_{}", file_name, timestamp),
    }
}
