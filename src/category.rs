//! Category table mapping file extensions to destination subfolders.
//!
//! A [`CategoryTable`] is an ordered list of named extension sets. Lookup is
//! a set-membership test with the first matching category in table order
//! winning; anything unmatched falls back to [`FALLBACK_CATEGORY`].
//!
//! # Examples
//!
//! ```
//! use downsort::category::CategoryTable;
//!
//! let table = CategoryTable::standard();
//! assert_eq!(table.classify(".pdf"), "Documents");
//! assert_eq!(table.classify(".PNG"), "Images");
//! assert_eq!(table.classify(".xyz"), "Others");
//! ```

use std::collections::HashSet;

/// Name of the fallback category for unrecognized extensions.
pub const FALLBACK_CATEGORY: &str = "Others";

/// A named bucket of file extensions with one destination subfolder.
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    extensions: HashSet<String>,
}

impl Category {
    /// Creates a category. Extensions are stored lowercase and are expected
    /// to carry their leading dot (`".pdf"`, not `"pdf"`).
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|ext| ext.to_lowercase()).collect(),
        }
    }

    /// The category name, which doubles as its subfolder name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership test against an already-lowercased extension.
    fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }
}

/// Ordered mapping from category name to extension set.
///
/// Immutable after construction and injected into the organizer, so the
/// table can be swapped out in tests without touching core logic.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Builds a table from the given categories, appending the fallback
    /// category when it is not already present.
    pub fn new(mut categories: Vec<Category>) -> Self {
        if !categories.iter().any(|c| c.name == FALLBACK_CATEGORY) {
            categories.push(Category::new(FALLBACK_CATEGORY, &[]));
        }
        Self { categories }
    }

    /// The standard table: Images, Videos, Documents, Audio, Archives,
    /// Programming, Executables, Torrents, and the Others fallback.
    ///
    /// `.dmg` and `.pkg` appear under both Archives and Executables; table
    /// order sends them to Archives.
    pub fn standard() -> Self {
        Self::new(vec![
            Category::new(
                "Images",
                &[
                    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".tiff", ".ico",
                ],
            ),
            Category::new(
                "Videos",
                &[
                    ".mp4", ".avi", ".mov", ".wmv", ".flv", ".webm", ".mkv", ".m4v", ".3gp",
                ],
            ),
            Category::new(
                "Documents",
                &[
                    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xls", ".xlsx", ".ppt",
                    ".pptx",
                ],
            ),
            Category::new(
                "Audio",
                &[".mp3", ".wav", ".aac", ".flac", ".ogg", ".m4a", ".wma"],
            ),
            Category::new(
                "Archives",
                &[".zip", ".rar", ".7z", ".tar", ".gz", ".dmg", ".pkg"],
            ),
            Category::new(
                "Programming",
                &[
                    ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".php", ".json", ".xml",
                ],
            ),
            Category::new(
                "Executables",
                &[".exe", ".msi", ".dmg", ".pkg", ".deb", ".rpm", ".apk"],
            ),
            Category::new("Torrents", &[".torrent"]),
        ])
    }

    /// Maps an extension (with leading dot, any case) to a category name.
    ///
    /// Pure and total: unmatched extensions, including the empty string,
    /// return [`FALLBACK_CATEGORY`].
    pub fn classify<'a>(&'a self, extension: &str) -> &'a str {
        let extension = extension.to_lowercase();
        self.categories
            .iter()
            .find(|category| category.contains(&extension))
            .map(Category::name)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Category names in table order, fallback last.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(Category::name)
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Extension of a file name including the leading dot, or `""` when there
/// is none. Mirrors a stem/extension split on the last dot, so
/// `"archive.tar.gz"` yields `".gz"` and `"README"` yields `""`.
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i > 0 => &file_name[i..],
        _ => "",
    }
}
