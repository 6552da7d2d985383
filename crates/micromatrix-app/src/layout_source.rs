//! Word lists and pre-generated layouts loaded from JSON files.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use micromatrix_core::{FixedLayout, Layout, LayoutGenerator, PictureLayout, WordEntry};

/// Errors that can occur while loading puzzle input files.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("{} contains no entries", path.display())]
    Empty { path: PathBuf },
}

fn read_json<T>(path: &Path) -> Result<T, LoadError>
where
    T: serde::de::DeserializeOwned,
{
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Loads a JSON array of `{"clue": ..., "answer": ...}` objects.
pub fn load_words(path: &Path) -> Result<Vec<WordEntry>, LoadError> {
    let words: Vec<WordEntry> = read_json(path)?;
    if words.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }
    log::debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Loads one layout in the generator's JSON output format.
pub fn load_layout(path: &Path) -> Result<Layout, LoadError> {
    let layout: Layout = read_json(path)?;
    log::debug!(
        "loaded {}x{} layout from {}",
        layout.cols,
        layout.rows,
        path.display()
    );
    Ok(layout)
}

/// Where new puzzles come from.
#[derive(Debug, Clone)]
pub enum LayoutSource {
    /// The built-in picture.
    Picture(PictureLayout),
    /// Pre-generated layouts, replayed round-robin.
    Rotation { layouts: Vec<FixedLayout>, next: usize },
}

impl LayoutSource {
    /// Loads every layout file. An empty list falls back to `fallback`.
    pub fn from_files(paths: &[PathBuf], fallback: PictureLayout) -> Result<Self, LoadError> {
        if paths.is_empty() {
            return Ok(Self::Picture(fallback));
        }
        let layouts = paths
            .iter()
            .map(|path| load_layout(path).map(FixedLayout::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Rotation { layouts, next: 0 })
    }
}

impl LayoutGenerator for LayoutSource {
    fn generate(&mut self, words: &[WordEntry]) -> Layout {
        match self {
            Self::Picture(picture) => picture.generate(words),
            Self::Rotation { layouts, next } => {
                let index = *next;
                *next = (index + 1) % layouts.len().max(1);
                layouts
                    .get_mut(index)
                    .map_or_else(Layout::default, |layout| layout.generate(words))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use micromatrix_core::PlacementOrientation;

    use super::*;

    const LAYOUT_JSON: &str = r#"{
        "rows": 3,
        "cols": 3,
        "table": [["C", "A", "T"], ["O", "-", "-"], ["W", "-", "-"]],
        "result": [
            {"clue": "Feline", "answer": "cat", "startx": 1, "starty": 1, "position": 1, "orientation": "across"},
            {"clue": "Bovine", "answer": "cow", "startx": 1, "starty": 1, "position": 1, "orientation": "down"},
            {"clue": "Canine", "answer": "dog", "orientation": "none"}
        ]
    }"#;

    #[test]
    fn test_load_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"[{"clue": "Feline", "answer": "cat"}]"#).unwrap();
        assert_eq!(
            load_words(&path).unwrap(),
            vec![WordEntry::new("Feline", "cat")]
        );

        fs::write(&path, "[]").unwrap();
        assert!(matches!(load_words(&path), Err(LoadError::Empty { .. })));

        fs::write(&path, "{").unwrap();
        assert!(matches!(load_words(&path), Err(LoadError::Json { .. })));

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_words(&missing), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_rotation_cycles_layouts() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        fs::write(&first, LAYOUT_JSON).unwrap();
        fs::write(&second, r#"{"rows": 1, "cols": 1}"#).unwrap();

        let mut source =
            LayoutSource::from_files(&[first, second], PictureLayout::new(["AB"])).unwrap();
        let words = [WordEntry::new("Feline", "cat")];

        let layout = source.generate(&words);
        let result = layout.result.unwrap();
        assert_eq!(result[2].orientation, PlacementOrientation::None);
        assert!(source.generate(&words).result.is_none());
        assert!(source.generate(&words).result.is_some());
    }

    #[test]
    fn test_empty_rotation_yields_empty_layout() {
        let mut source = LayoutSource::Rotation {
            layouts: Vec::new(),
            next: 0,
        };
        let words = [WordEntry::new("Feline", "cat")];
        assert_eq!(source.generate(&words), Layout::default());
        assert_eq!(source.generate(&words), Layout::default());
    }

    #[test]
    fn test_no_files_uses_fallback() {
        let source = LayoutSource::from_files(&[], PictureLayout::new(["AB"])).unwrap();
        assert!(matches!(source, LayoutSource::Picture(_)));
    }
}
