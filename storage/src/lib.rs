//storage holds the flat aligned-text dumps of a landmass

pub mod models;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use landmass_core::render::{CELL_WIDTH, format_heights, format_symbols};
use landmass_core::{Grid, HeightMap, Landmass, SymbolGrid, Terrain, TerrainError};
use log::{info, warn};
use thiserror::Error;

use crate::models::{DumpKind, SaveReport};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("{kind:?} dump is {found:?} but the terrain dump is {expected:?} (width, height)")]
    ShapeMismatch {
        kind: DumpKind,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

pub struct TextStore {
    dir: PathBuf,
}

impl TextStore {
    // Use `dir` as the dump folder, creating it if needed
    pub fn init(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: DumpKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn save_heights(&self, kind: DumpKind, map: &HeightMap) -> Result<PathBuf, StorageError> {
        let path = self.path_for(kind);
        write_text(&path, &format_heights(map))?;
        Ok(path)
    }

    pub fn save_symbols(&self, symbols: &SymbolGrid) -> Result<PathBuf, StorageError> {
        let path = self.path_for(DumpKind::Final);
        write_text(&path, &format_symbols(symbols))?;
        Ok(path)
    }

    // Write all three dumps; failures are collected, not fatal
    pub fn save_landmass(&self, landmass: &Landmass) -> SaveReport {
        let mut report = SaveReport::default();
        for kind in DumpKind::ALL {
            let result = match kind {
                DumpKind::Raw => self.save_heights(kind, &landmass.raw),
                DumpKind::Normalized => self.save_heights(kind, landmass.normalized.heights()),
                DumpKind::Final => self.save_symbols(&landmass.symbols),
            };
            match result {
                Ok(path) => {
                    info!("Map saved to {}", path.display());
                    report.saved.push(path);
                }
                Err(e) => {
                    let path = self.path_for(kind);
                    warn!("Failed to save the map to {}: {e}", path.display());
                    report.failed.push((path, e));
                }
            }
        }
        report
    }

    /// Read a height dump back, checked against the terrain dump's shape.
    ///
    /// A value too wide for its column shifts every later field on the line,
    /// which can still leave a line that splits evenly into columns. The
    /// symbol dump has one character per cell, so it pins the real width.
    pub fn load_heights(&self, kind: DumpKind) -> Result<HeightMap, StorageError> {
        let map = parse_heights(&read_text(&self.path_for(kind))?)?;
        let symbols = self.load_symbols()?;
        if !map.same_shape(&symbols) {
            return Err(StorageError::ShapeMismatch {
                kind,
                expected: (symbols.width(), symbols.height()),
                found: (map.width(), map.height()),
            });
        }
        Ok(map)
    }

    pub fn load_symbols(&self) -> Result<SymbolGrid, StorageError> {
        parse_symbols(&read_text(&self.path_for(DumpKind::Final))?)
    }
}

fn write_text(path: &Path, text: &str) -> Result<(), StorageError> {
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = BufWriter::new(File::create(path).map_err(io_err)?);
    file.write_all(text.as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)
}

fn read_text(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a height dump back into a grid.
///
/// Fields are fixed at four columns, so only dumps whose values all fit in
/// four digits can be read back. Normalized dumps always do; raw dumps of
/// heavily stacked deposits may not, and this parser alone cannot always
/// tell. Use `TextStore::load_heights` for dumps on disk.
pub fn parse_heights(text: &str) -> Result<HeightMap, StorageError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.len() % CELL_WIDTH != 0 || !line.is_ascii() {
            return Err(StorageError::Parse {
                line: line_no,
                reason: format!("length {} is not a multiple of {CELL_WIDTH}", line.len()),
            });
        }
        let row = line
            .as_bytes()
            .chunks(CELL_WIDTH)
            .map(|field| {
                let field = std::str::from_utf8(field).unwrap_or_default().trim_start();
                field.parse::<u32>().map_err(|e| StorageError::Parse {
                    line: line_no,
                    reason: format!("bad field {field:?}: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(Grid::from_rows(rows)?)
}

pub fn parse_symbols(text: &str) -> Result<SymbolGrid, StorageError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let row = line
            .chars()
            .map(|c| {
                Terrain::from_symbol(c).ok_or_else(|| StorageError::Parse {
                    line: i + 1,
                    reason: format!("unknown terrain symbol {c:?}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(Grid::from_rows(rows)?)
}
