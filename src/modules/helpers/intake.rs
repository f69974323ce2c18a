use std::path::{Path, PathBuf};

pub const SOURCE_EXTENSION: &str = ".heic";
pub const PICKER_EXTENSIONS: &[&str] = &["heic", "HEIC"];

pub fn has_source_extension(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(SOURCE_EXTENSION)
}

#[derive(Debug, Default)]
pub struct IntakeReport {
    pub accepted: usize,
    pub rejected: Vec<PathBuf>,
}

impl IntakeReport {
    pub fn warnings(&self) -> impl Iterator<Item = String> + '_ {
        self.rejected.iter().map(|p| format!("{} is not a HEIC file.", p.display()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub convert: bool,
    pub clear: bool,
}

/// Files waiting to be converted, in the order they were dropped.
/// Append-only apart from [`PendingList::clear`]; duplicates are kept.
#[derive(Debug, Default, Clone)]
pub struct PendingList {
    paths: Vec<PathBuf>,
}

impl PendingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest<I>(&mut self, candidates: I) -> IntakeReport
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut report = IntakeReport::default();
        for path in candidates {
            if has_source_extension(&path) {
                self.paths.push(path);
                report.accepted += 1;
            } else {
                log::warn!("Rejected {}: not a HEIC file", path.display());
                report.rejected.push(path);
            }
        }
        report
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn affordances(&self) -> Affordances {
        let any = !self.is_empty();
        Affordances { convert: any, clear: any }
    }
}
