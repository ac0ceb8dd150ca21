use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use console::style;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::records::{ParticipantRecord, parse_json, parse_toml};
use crate::constants::store::RECORD_EXTENSIONS;
use crate::core::{Participant, ParticipantMap};
use crate::error::BarterWheelError;
use crate::progress::ProgressReporter;
use crate::utils::string::pluralize;

/// Finds participant record files under a set of paths
///
/// Paths may name record files, directories (searched recursively, hidden
/// entries skipped) or glob patterns. Each file is reported once, in sorted
/// order.
pub struct RecordDiscovery {
    discovered: BTreeSet<PathBuf>,
}

impl Default for RecordDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordDiscovery {
    pub fn new() -> Self {
        Self {
            discovered: BTreeSet::new(),
        }
    }

    pub fn discover_all(&mut self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, BarterWheelError> {
        for path in paths {
            let pattern = path.to_string_lossy();
            if is_glob(&pattern) {
                let matches = glob::glob(&pattern).map_err(|source| {
                    BarterWheelError::GlobPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })?;
                for entry in matches.flatten() {
                    self.discover_in_path(&entry, false)?;
                }
                continue;
            }

            if !path.exists() {
                eprintln!(
                    "{} Path '{}' does not exist",
                    style("⚠").yellow(),
                    path.display()
                );
                warn!(path = %path.display(), "path does not exist");
                continue;
            }

            self.discover_in_path(path, true)?;
        }

        Ok(self.discovered.iter().cloned().collect())
    }

    /// `explicit` files must be record files; files found any other way are
    /// filtered by extension
    fn discover_in_path(&mut self, path: &Path, explicit: bool) -> Result<(), BarterWheelError> {
        if path.is_dir() {
            let files = WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_record_file(e.path()))
                .map(|e| e.into_path());
            self.discovered.extend(files);
        } else if is_record_file(path) {
            self.discovered.insert(path.to_path_buf());
        } else if explicit {
            return Err(BarterWheelError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_record_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RECORD_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Participants read from one record file
#[derive(Debug, Clone)]
pub struct RecordFile {
    pub path: PathBuf,
    pub participants: Vec<Participant>,
    pub dropped_items: usize,
    pub skipped_records: usize,
}

/// Read and normalize one record file
pub fn read_record_file(path: &Path) -> Result<RecordFile, BarterWheelError> {
    let content =
        std::fs::read_to_string(path).map_err(|source| BarterWheelError::FileReadError {
            path: path.to_path_buf(),
            source,
        })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let records: Vec<ParticipantRecord> = match extension.as_deref() {
        Some("json") => parse_json(path, &content)?,
        Some("toml") => parse_toml(path, &content)?,
        _ => {
            return Err(BarterWheelError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    let mut file = RecordFile {
        path: path.to_path_buf(),
        participants: Vec::with_capacity(records.len()),
        dropped_items: 0,
        skipped_records: 0,
    };

    for record in records {
        match record.normalize() {
            Ok(normalized) => {
                file.dropped_items += normalized.dropped_items;
                file.participants.push(normalized.participant);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping participant record");
                file.skipped_records += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        participants = file.participants.len(),
        dropped_items = file.dropped_items,
        "read record file"
    );
    Ok(file)
}

/// Everything loaded for one exchange round
#[derive(Debug, Clone, Default)]
pub struct LoadedParticipants {
    pub participants: ParticipantMap,
    pub files: Vec<PathBuf>,
    pub failed_files: Vec<PathBuf>,
    pub dropped_items: usize,
    pub skipped_records: usize,
}

/// Discover, parse and merge participant records
///
/// Files are parsed in parallel. A file that cannot be read or parsed is
/// reported and skipped; the rest are merged in path order. The same
/// participant id in two records is an error.
pub fn load_participants(
    paths: &[PathBuf],
    progress: Option<&ProgressReporter>,
) -> Result<LoadedParticipants, BarterWheelError> {
    let files = RecordDiscovery::new().discover_all(paths)?;

    let (mut parsed, failed): (Vec<RecordFile>, Vec<(PathBuf, BarterWheelError)>) = files
        .into_par_iter()
        .map(|path| {
            if let Some(p) = progress {
                p.reading_file(&path);
            }
            let result = read_record_file(&path);
            (path, result)
        })
        .partition_map(|(path, result)| match result {
            Ok(file) => rayon::iter::Either::Left(file),
            Err(e) => rayon::iter::Either::Right((path, e)),
        });
    parsed.sort_by(|a, b| a.path.cmp(&b.path));

    let mut failed_files = Vec::with_capacity(failed.len());
    for (path, error) in failed {
        eprintln!(
            "{} Skipping {}: {:?}",
            style("⚠").yellow(),
            path.display(),
            miette::Report::new(error)
        );
        failed_files.push(path);
    }

    let mut loaded = LoadedParticipants {
        failed_files,
        ..Default::default()
    };
    let mut participants = Vec::new();
    for file in parsed {
        loaded.dropped_items += file.dropped_items;
        loaded.skipped_records += file.skipped_records;
        participants.extend(file.participants);
        loaded.files.push(file.path);
    }
    loaded.participants = ParticipantMap::new(participants)?;

    if loaded.dropped_items > 0 {
        eprintln!(
            "{} Ignored {} offer/want {} without a usable identifier",
            style("⚠").yellow(),
            loaded.dropped_items,
            pluralize("item", loaded.dropped_items)
        );
    }

    info!(
        files = loaded.files.len(),
        failed = loaded.failed_files.len(),
        participants = loaded.participants.len(),
        dropped_items = loaded.dropped_items,
        "participants loaded"
    );
    Ok(loaded)
}
