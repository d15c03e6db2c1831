use std::path::PathBuf;

use crate::StorageError;

// The three grids a generation run leaves on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    Raw,
    Normalized,
    Final,
}

impl DumpKind {
    pub const ALL: [DumpKind; 3] = [DumpKind::Raw, DumpKind::Normalized, DumpKind::Final];

    pub fn file_name(self) -> &'static str {
        match self {
            DumpKind::Raw => "raw_landmass.txt",
            DumpKind::Normalized => "normalized_landmass.txt",
            DumpKind::Final => "final_landmass.txt",
        }
    }
}

/// Per-file outcome of saving a whole landmass.
///
/// A failed file does not stop the others from being written.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, StorageError)>,
}

impl SaveReport {
    pub fn all_saved(&self) -> bool {
        self.failed.is_empty()
    }
}
