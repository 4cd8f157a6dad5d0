//! Content loaders for reading game data from files.
//!
//! Each loader turns one kind of authored document into game-core types.
//! Documents may be JSON, RON or TOML; the format is chosen by extension.

pub mod actors;
pub mod config;
pub mod factory;
pub mod item;
pub mod map;
pub mod tables;

pub use actors::{MonsterLoader, PlayerLoader};
pub use config::{ConfigLoader, ContentManifest};
pub use factory::ContentFactory;
pub use item::{BuffLoader, EquipmentLoader, ItemLoader};
pub use map::MapLoader;
pub use tables::LevelLoader;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Serialization format of a content document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Ron,
    Toml,
}

impl DocumentFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["json", "ron", "toml"];

    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "ron" => Some(Self::Ron),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A parsed document together with the file stem it came from.
#[derive(Clone, Debug)]
pub struct Document<T> {
    pub stem: String,
    pub value: T,
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads and deserializes `path`, picking the parser from its extension.
pub(crate) fn parse_document<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let format = DocumentFormat::from_path(path)
        .with_context(|| format!("Unsupported document format: {}", path.display()))?;
    let content = read_file(path)?;

    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(&content).map_err(anyhow::Error::from),
        DocumentFormat::Ron => ron::from_str(&content).map_err(anyhow::Error::from),
        DocumentFormat::Toml => toml::from_str(&content).map_err(anyhow::Error::from),
    };
    parsed.with_context(|| format!("Failed to parse {}", path.display()))
}

/// Lists supported documents directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub(crate) fn document_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && DocumentFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Finds the first existing document named `<stem>.<ext>` in `dir`.
pub(crate) fn find_document(dir: &Path, stems: &[&str]) -> Option<PathBuf> {
    stems.iter().find_map(|stem| {
        DocumentFormat::EXTENSIONS
            .iter()
            .map(|extension| dir.join(format!("{stem}.{extension}")))
            .find(|path| path.is_file())
    })
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Parses every document in `dir` into `R` and converts it with `build`.
///
/// Documents for which `build` returns `None` (no usable id) are skipped with
/// a warning.
pub(crate) fn load_documents<R, T>(
    dir: &Path,
    mut build: impl FnMut(R) -> Option<T>,
) -> LoadResult<Vec<Document<T>>>
where
    R: DeserializeOwned,
{
    let mut documents = Vec::new();
    for path in document_files(dir)? {
        let raw: R = parse_document(&path)?;
        match build(raw) {
            Some(value) => documents.push(Document {
                stem: file_stem(&path),
                value,
            }),
            None => tracing::warn!(path = %path.display(), "skipping definition without an id"),
        }
    }
    Ok(documents)
}

/// Rejects blank ids.
pub(crate) fn usable_id(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.JSON")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("b.ron")),
            Some(DocumentFormat::Ron)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("b.txt")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let files = document_files(&dir.path().join("absent")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn documents_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.ron", "notes.md"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let names: Vec<String> = document_files(dir.path())
            .unwrap()
            .iter()
            .map(|path| file_stem(path))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
