//! Integration tests for downsort.
//!
//! These simulate real-world usage end to end: organizing a messy downloads
//! folder, simulate mode, collision handling, exclusion rules, and the
//! category listing operation.

use downsort::config::ExcludeConfig;
use downsort::organizer::{LIST_PREVIEW_LIMIT, Organizer, Stats};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Temporary directory with helpers for seeding and asserting file layouts.
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        TestFixture { temp_dir }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn create_file(&self, name: &str, content: &str) {
        let file_path = self.path().join(name);
        let mut file = File::create(&file_path).expect("Failed to create file");
        file.write_all(content.as_bytes())
            .expect("Failed to write file content");
    }

    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_file(name, "content");
        }
    }

    fn create_subdir(&self, name: &str) {
        fs::create_dir(self.path().join(name)).expect("Failed to create subdirectory");
    }

    fn organizer(&self, simulate: bool) -> Organizer {
        Organizer::new(self.path(), simulate)
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "File should exist: {}",
            path.display()
        );
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "File should not exist: {}", path.display());
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_dir(),
            "Directory should exist: {}",
            path.display()
        );
    }

    /// Count top-level files (non-recursive).
    fn count_root_files(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .flatten()
            .filter(|e| e.path().is_file())
            .count()
    }

    /// Count top-level directories (non-recursive).
    fn count_root_dirs(&self) -> usize {
        fs::read_dir(self.path())
            .expect("Failed to read directory")
            .flatten()
            .filter(|e| e.path().is_dir())
            .count()
    }

    /// All files anywhere under the fixture, sorted.
    fn list_files_recursive(&self) -> Vec<PathBuf> {
        fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_file() {
                        files.push(path);
                    } else if path.is_dir() {
                        walk(&path, files);
                    }
                }
            }
        }
        let mut files = Vec::new();
        walk(self.path(), &mut files);
        files.sort();
        files
    }
}

// ============================================================================
// Basic organization
// ============================================================================

#[test]
fn organize_empty_directory_creates_all_category_folders() {
    let fixture = TestFixture::new();
    let mut organizer = fixture.organizer(false);

    assert!(organizer.organize());

    // All nine category folders exist even with nothing to move.
    assert_eq!(fixture.count_root_dirs(), 9);
    assert_eq!(organizer.stats(), Stats::default());
}

#[test]
fn organize_single_image() {
    let fixture = TestFixture::new();
    fixture.create_file("photo.png", "img");

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_dir_exists("Images");
    fixture.assert_file_exists("Images/photo.png");
    fixture.assert_file_not_exists("photo.png");
}

#[test]
fn organize_mixed_file_types() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        "photo.jpg",
        "clip.mp4",
        "report.pdf",
        "song.mp3",
        "bundle.zip",
        "script.py",
        "setup.exe",
        "movie.torrent",
        "mystery.xyz",
    ]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Images/photo.jpg");
    fixture.assert_file_exists("Videos/clip.mp4");
    fixture.assert_file_exists("Documents/report.pdf");
    fixture.assert_file_exists("Audio/song.mp3");
    fixture.assert_file_exists("Archives/bundle.zip");
    fixture.assert_file_exists("Programming/script.py");
    fixture.assert_file_exists("Executables/setup.exe");
    fixture.assert_file_exists("Torrents/movie.torrent");
    fixture.assert_file_exists("Others/mystery.xyz");

    assert_eq!(fixture.count_root_files(), 0);
    let stats = organizer.stats();
    assert_eq!(stats.total_files, 9);
    assert_eq!(stats.moved_files, 9);
    assert_eq!(stats.errors, 0);
}

#[test]
fn organize_many_files_empties_the_root() {
    let fixture = TestFixture::new();
    for i in 0..50 {
        let name = match i % 5 {
            0 => format!("image_{}.png", i),
            1 => format!("doc_{}.txt", i),
            2 => format!("audio_{}.mp3", i),
            3 => format!("archive_{}.zip", i),
            _ => format!("page_{}.html", i),
        };
        fixture.create_file(&name, "content");
    }

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    assert_eq!(fixture.count_root_files(), 0);
    let stats = organizer.stats();
    assert_eq!(stats.total_files, 50);
    assert_eq!(stats.moved_files, 50);
    assert_eq!(
        stats.total_files,
        stats.moved_files + stats.skipped_files + stats.errors
    );
}

#[test]
fn organize_missing_target_fails_without_stats() {
    let mut organizer = Organizer::new("/non/existent/path", false);
    assert!(!organizer.organize());
    assert_eq!(organizer.stats(), Stats::default());
}

// ============================================================================
// Classification edge cases
// ============================================================================

#[test]
fn mixed_case_extensions_are_classified() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.PNG", "report.PDF", "song.MP3"]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Images/photo.PNG");
    fixture.assert_file_exists("Documents/report.PDF");
    fixture.assert_file_exists("Audio/song.MP3");
}

#[test]
fn multiple_dots_use_the_last_extension() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.backup.png", "report.final.pdf", "dump.tar.gz"]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Images/photo.backup.png");
    fixture.assert_file_exists("Documents/report.final.pdf");
    fixture.assert_file_exists("Archives/dump.tar.gz");
}

#[test]
fn files_without_extension_go_to_others() {
    let fixture = TestFixture::new();
    fixture.create_files(&["README", "LICENSE"]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Others/README");
    fixture.assert_file_exists("Others/LICENSE");
}

#[test]
fn special_characters_in_filenames() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo (1).png", "document - final.pdf", "song [remix].mp3"]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Images/photo (1).png");
    fixture.assert_file_exists("Documents/document - final.pdf");
    fixture.assert_file_exists("Audio/song [remix].mp3");
}

#[test]
fn hidden_files_and_subdirectories_are_untouched() {
    let fixture = TestFixture::new();
    fixture.create_file(".hidden_config", "config");
    fixture.create_subdir("projects");
    fixture.create_file("projects/notes.txt", "inside");
    fixture.create_file("photo.png", "img");

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists(".hidden_config");
    fixture.assert_file_exists("projects/notes.txt");
    fixture.assert_file_exists("Images/photo.png");
    assert_eq!(organizer.stats().total_files, 1);
}

// ============================================================================
// Simulate mode
// ============================================================================

#[test]
fn simulate_mode_leaves_filesystem_untouched() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "report.pdf", "song.mp3"]);

    let mut organizer = fixture.organizer(true);
    assert!(organizer.organize());

    // No folders created, no files moved.
    assert_eq!(fixture.count_root_dirs(), 0);
    fixture.assert_file_exists("photo.png");
    fixture.assert_file_exists("report.pdf");
    fixture.assert_file_exists("song.mp3");

    // But the counters reflect what would have happened.
    let stats = organizer.stats();
    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.moved_files, 3);
    assert_eq!(stats.errors, 0);
}

#[test]
fn simulate_then_real_run() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "report.pdf"]);

    let mut simulated = fixture.organizer(true);
    assert!(simulated.organize());
    assert_eq!(fixture.count_root_files(), 2);

    let mut real = fixture.organizer(false);
    assert!(real.organize());
    assert_eq!(fixture.count_root_files(), 0);
    fixture.assert_file_exists("Images/photo.png");
    fixture.assert_file_exists("Documents/report.pdf");
}

// ============================================================================
// Collision handling and idempotence
// ============================================================================

#[test]
fn collision_keeps_both_files() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Documents");
    fixture.create_file("Documents/report.pdf", "old");
    fixture.create_file("report.pdf", "new");

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    let names: Vec<String> = fs::read_dir(fixture.path().join("Documents"))
        .expect("Failed to read Documents")
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n == "report.pdf"));
    assert!(
        names
            .iter()
            .any(|n| n.starts_with("report_") && n.ends_with(".pdf")),
        "expected a timestamp-renamed copy, got {:?}",
        names
    );
    assert_eq!(organizer.stats().moved_files, 1);

    // The original keeps its content; the incoming file got the new name.
    let original = fs::read_to_string(fixture.path().join("Documents/report.pdf"))
        .expect("Failed to read original");
    assert_eq!(original, "old");
}

#[test]
fn organize_twice_is_idempotent() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.png", "report.pdf", "song.mp3"]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());
    let files_after_first = fixture.list_files_recursive();

    assert!(organizer.organize());
    let files_after_second = fixture.list_files_recursive();

    assert_eq!(files_after_first, files_after_second);
    let stats = organizer.stats();
    assert_eq!(stats.moved_files, 0);
    assert_eq!(stats.skipped_files, stats.total_files);
}

#[test]
fn organize_with_existing_category_directories() {
    let fixture = TestFixture::new();
    fixture.create_subdir("Images");
    fixture.create_file("Images/existing.png", "old");
    fixture.create_file("new_photo.png", "new");

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Images/existing.png");
    fixture.assert_file_exists("Images/new_photo.png");
}

#[test]
fn organize_then_add_files_then_organize_again() {
    let fixture = TestFixture::new();
    fixture.create_file("photo1.png", "img");

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());
    fixture.assert_file_exists("Images/photo1.png");

    fixture.create_file("photo2.png", "img");
    assert!(organizer.organize());

    fixture.assert_file_exists("Images/photo1.png");
    fixture.assert_file_exists("Images/photo2.png");
    assert_eq!(organizer.stats().total_files, 1);
    assert_eq!(organizer.stats().moved_files, 1);
}

// ============================================================================
// Exclusion rules
// ============================================================================

#[test]
fn partial_downloads_are_left_alone_by_default() {
    let fixture = TestFixture::new();
    fixture.create_files(&["movie.mp4", "movie.mp4.part", "setup.exe.crdownload"]);

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    fixture.assert_file_exists("Videos/movie.mp4");
    fixture.assert_file_exists("movie.mp4.part");
    fixture.assert_file_exists("setup.exe.crdownload");
    assert_eq!(organizer.stats().total_files, 1);
}

#[test]
fn exclusion_config_from_file() {
    let fixture = TestFixture::new();
    let config_path = fixture.path().join("rules.toml");
    fs::write(
        &config_path,
        r#"
        [exclude]
        filenames = ["pinned.pdf", "rules.toml"]
        patterns = ["*.iso"]
        "#,
    )
    .expect("Failed to write config");

    fixture.create_files(&["pinned.pdf", "linux.iso", "photo.png"]);

    let excludes = ExcludeConfig::load(Some(&config_path))
        .expect("load failed")
        .compile()
        .expect("compile failed");
    let mut organizer = fixture.organizer(false).with_excludes(excludes);
    assert!(organizer.organize());

    fixture.assert_file_exists("pinned.pdf");
    fixture.assert_file_exists("linux.iso");
    fixture.assert_file_exists("Images/photo.png");
    assert_eq!(organizer.stats().total_files, 1);
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn listing_reports_first_ten_and_overcount() {
    let fixture = TestFixture::new();
    for i in 0..12 {
        fixture.create_file(&format!("doc_{:02}.txt", i), "text");
    }

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    let listings = organizer
        .list_files_by_category()
        .expect("target should exist");
    let documents = listings
        .iter()
        .find(|l| l.category == "Documents")
        .expect("Documents listing missing");

    assert_eq!(documents.total, 12);
    assert_eq!(documents.files.len(), LIST_PREVIEW_LIMIT);
    // Sorted, so the preview is the lexicographically first ten.
    assert_eq!(documents.files[0], "doc_00.txt");
    assert_eq!(documents.files[9], "doc_09.txt");
}

#[test]
fn listing_on_missing_target_is_none() {
    let organizer = Organizer::new("/non/existent/path", false);
    assert!(organizer.list_files_by_category().is_none());
}

#[test]
fn listing_only_includes_non_empty_categories() {
    let fixture = TestFixture::new();
    fixture.create_file("photo.png", "img");

    let mut organizer = fixture.organizer(false);
    assert!(organizer.organize());

    let listings = organizer
        .list_files_by_category()
        .expect("target should exist");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].category, "Images");
}
