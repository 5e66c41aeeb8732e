//! Level descriptors and the level catalog
//!
//! A level is a grid size plus an ordered list of piece ids (shape-table
//! indices). The catalog starts from the built-in levels and can be replaced
//! by a JSON file.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tui_tiles_core::SHAPES;

/// Largest accepted grid side, in cells.
pub const MAX_GRID_SIDE: u16 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    #[serde(default)]
    pub name: String,
    pub tiles_x: u16,
    pub tiles_y: u16,
    pub pieces: Vec<usize>,
}

impl LevelDescriptor {
    pub fn new(name: impl Into<String>, tiles_x: u16, tiles_y: u16, pieces: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            tiles_x,
            tiles_y,
            pieces,
        }
    }

    /// Check the descriptor against a catalog of `catalog_len` pieces.
    pub fn validate(&self, catalog_len: usize) -> Result<(), LevelError> {
        validate_level(self.tiles_x, self.tiles_y, &self.pieces, catalog_len)
    }
}

/// Rejections of a level descriptor. No engine state is touched on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("grid must have at least one cell (got {tiles_x}x{tiles_y})")]
    EmptyGrid { tiles_x: u16, tiles_y: u16 },
    #[error("grid {tiles_x}x{tiles_y} exceeds the {max}x{max} limit")]
    GridTooLarge { tiles_x: u16, tiles_y: u16, max: u16 },
    #[error("piece id {id} is not in the catalog of {catalog_len} pieces")]
    UnknownPiece { id: usize, catalog_len: usize },
    #[error("piece id {id} appears more than once")]
    DuplicatePiece { id: usize },
    #[error("piece resources are not loaded")]
    ResourcesNotLoaded,
}

pub fn validate_level(
    tiles_x: u16,
    tiles_y: u16,
    pieces: &[usize],
    catalog_len: usize,
) -> Result<(), LevelError> {
    if tiles_x == 0 || tiles_y == 0 {
        return Err(LevelError::EmptyGrid { tiles_x, tiles_y });
    }
    if tiles_x > MAX_GRID_SIDE || tiles_y > MAX_GRID_SIDE {
        return Err(LevelError::GridTooLarge {
            tiles_x,
            tiles_y,
            max: MAX_GRID_SIDE,
        });
    }
    if catalog_len == 0 {
        return Err(LevelError::ResourcesNotLoaded);
    }
    for (i, &id) in pieces.iter().enumerate() {
        if id >= catalog_len {
            return Err(LevelError::UnknownPiece { id, catalog_len });
        }
        // A piece instance is shared across levels, so it can appear once.
        if pieces[..i].contains(&id) {
            return Err(LevelError::DuplicatePiece { id });
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read level catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid level catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalog is empty")]
    Empty,
    #[error("level {index} ({name:?}) is invalid: {source}")]
    InvalidLevel {
        index: usize,
        name: String,
        #[source]
        source: LevelError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelDescriptor>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelCatalog {
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                LevelDescriptor::new("Warm-up", 1, 3, vec![3]),
                LevelDescriptor::new("Square", 5, 5, vec![5, 6, 7, 8]),
            ],
        }
    }

    /// Parse a JSON array of levels and validate every entry against the shape table.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<LevelDescriptor> = serde_json::from_str(json)?;
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            level
                .validate(SHAPES.len())
                .map_err(|source| CatalogError::InvalidLevel {
                    index,
                    name: level.name.clone(),
                    source,
                })?;
        }
        Ok(Self { levels })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load from `TILES_LEVELS_PATH` when set; otherwise the built-in catalog.
    ///
    /// A file that fails to load is logged and the built-in catalog is used.
    pub fn from_env() -> Self {
        let path = env::var("TILES_LEVELS_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        match path {
            None => Self::builtin(),
            Some(path) => match Self::load(&path) {
                Ok(catalog) => {
                    tracing::info!(path = %path, levels = catalog.len(), "level catalog loaded");
                    catalog
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "level catalog unusable, using built-in levels");
                    Self::builtin()
                }
            },
        }
    }

    pub fn get(&self, index: usize) -> Option<&LevelDescriptor> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }

    /// Index after `index`, wrapping.
    pub fn next_index(&self, index: usize) -> usize {
        if self.levels.is_empty() {
            return 0;
        }
        (index + 1) % self.levels.len()
    }

    /// Index before `index`, wrapping.
    pub fn prev_index(&self, index: usize) -> usize {
        if self.levels.is_empty() {
            return 0;
        }
        (index + self.levels.len() - 1) % self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_levels_are_valid() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        for level in catalog.iter() {
            assert!(level.validate(SHAPES.len()).is_ok());
        }
        // Both built-in levels exactly cover their grids.
        for level in catalog.iter() {
            let cells: usize = level.pieces.iter().map(|&id| SHAPES[id].cell_count()).sum();
            assert_eq!(cells, level.tiles_x as usize * level.tiles_y as usize);
        }
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            validate_level(0, 3, &[0], 9),
            Err(LevelError::EmptyGrid { tiles_x: 0, tiles_y: 3 })
        );
        assert_eq!(
            validate_level(3, 3, &[9], 9),
            Err(LevelError::UnknownPiece { id: 9, catalog_len: 9 })
        );
        assert_eq!(
            validate_level(3, 3, &[1, 2, 1], 9),
            Err(LevelError::DuplicatePiece { id: 1 })
        );
        assert_eq!(validate_level(3, 3, &[0], 0), Err(LevelError::ResourcesNotLoaded));
        assert!(matches!(
            validate_level(65, 1, &[0], 9),
            Err(LevelError::GridTooLarge { .. })
        ));
        assert!(validate_level(3, 3, &[], 9).is_ok());
    }

    #[test]
    fn parses_json_catalog() {
        let json = r#"[
            {"name": "Pair", "tiles_x": 2, "tiles_y": 1, "pieces": [0, 1]},
            {"tiles_x": 3, "tiles_y": 3, "pieces": [8]}
        ]"#;
        let catalog = LevelCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().name, "Pair");
        assert_eq!(catalog.get(1).unwrap().name, "");
    }

    #[test]
    fn rejects_bad_catalogs() {
        assert!(matches!(
            LevelCatalog::from_json_str("[]"),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            LevelCatalog::from_json_str("{"),
            Err(CatalogError::Parse(_))
        ));
        let err = LevelCatalog::from_json_str(r#"[{"tiles_x": 2, "tiles_y": 2, "pieces": [42]}]"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidLevel { index: 0, .. }));
        assert!(matches!(
            LevelCatalog::load("/no/such/levels.json"),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn navigation_wraps() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.next_index(0), 1);
        assert_eq!(catalog.next_index(1), 0);
        assert_eq!(catalog.prev_index(0), 1);
    }
}
