use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SigDigitsError;
use crate::significant::{significant_digits, SigDigitsConfig};
use crate::table::{parse_table, Matrix};

/// Result files per subject, keyed by file stem.
pub type SubjectFiles = BTreeMap<String, Vec<PathBuf>>;

/// Find every `*.mat` file under `base` and group the files by stem.
///
/// FLIRT names its matrix `<subject>.mat` in every run directory, so the stem is the
/// subject and each group holds one file per run. Paths within a group are sorted.
/// Symbolic links are followed.
pub fn parse_mat_files(base: impl AsRef<Path>) -> SubjectFiles {
    let base = base.as_ref();
    let mut subjects_mat_files = SubjectFiles::new();

    walkdir::WalkDir::new(base)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "mat")
                    .unwrap_or(false)
        })
        .for_each(|entry| {
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                subjects_mat_files
                    .entry(stem.to_string())
                    .or_default()
                    .push(entry.path().to_path_buf());
            }
        });

    subjects_mat_files.values_mut().for_each(|files| files.sort());

    log::info!(
        "Found {} subjects under {}",
        subjects_mat_files.len(),
        base.display()
    );

    subjects_mat_files
}

/// Load a whitespace delimited numeric table.
pub fn load_mat_file(path: impl AsRef<Path>) -> Result<Matrix, SigDigitsError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_table(&text, path)
}

/// Compute the significant digits of every subject.
///
/// The reference of a subject is the element-wise mean of its runs.
pub fn compute_significant_digits(
    subjects_mat_files: &SubjectFiles,
    config: &SigDigitsConfig,
) -> Result<BTreeMap<String, Matrix>, SigDigitsError> {
    subjects_mat_files
        .iter()
        .map(|(subject, mat_files)| -> Result<(String, Matrix), SigDigitsError> {
            let samples = mat_files
                .iter()
                .map(load_mat_file)
                .collect::<Result<Vec<_>, _>>()?;
            let reference = Matrix::mean(&samples)?;
            let digits = significant_digits(&samples, &reference, config)?;
            log::debug!("{subject}: {} runs", samples.len());
            Ok((subject.clone(), digits))
        })
        .collect()
}
