use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::InvocationError;

/// Suffix of the anatomical scans used as FLIRT inputs.
pub const T1W_SUFFIX: &str = "_T1w.nii.gz";

/// Path components of a discovered T1w scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct T1Fields {
    /// The dataset root the scan was found under.
    pub base: PathBuf,
    /// Subject label, e.g. `sub-0025531`.
    pub subject: String,
    /// Session label, e.g. `ses-1`.
    pub session: String,
    /// File name of the scan.
    pub t1: String,
}

/// The two sessions registered against each other for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sessions {
    /// Scan of `ses-1`, the moving image.
    pub session_1: Option<PathBuf>,
    /// Scan of `ses-2`, the reference image.
    pub session_2: Option<PathBuf>,
}

/// Sessions per subject, ordered by subject label.
pub type SubjectSessions = BTreeMap<String, Sessions>;

/// Find all `base/sub-*/ses-*/anat/*_T1w.nii.gz` files.
///
/// Symbolic links are followed, so annexed datasets are found. Unreadable entries
/// are skipped. The result is sorted.
pub fn find_t1s(base: impl AsRef<Path>) -> Vec<PathBuf> {
    let base = base.as_ref();

    let mut t1s = walkdir::WalkDir::new(base)
        .follow_links(true)
        .min_depth(4)
        .max_depth(4)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(base)
                .map(matches_t1_layout)
                .unwrap_or(false)
        })
        .map(|entry| entry.path().to_path_buf())
        .collect::<Vec<_>>();
    t1s.sort();

    if t1s.is_empty() {
        log::warn!("No T1w scans found under {}", base.display());
    } else {
        log::info!("Found {} T1w scans under {}", t1s.len(), base.display());
    }

    t1s
}

fn matches_t1_layout(relative: &Path) -> bool {
    match normal_components(relative).as_slice() {
        [subject, session, anat, t1] => {
            subject.starts_with("sub-")
                && session.starts_with("ses-")
                && *anat == "anat"
                && t1.ends_with(T1W_SUFFIX)
        }
        _ => false,
    }
}

fn normal_components(path: &Path) -> Vec<&str> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect()
}

/// Split a T1w path into its dataset fields.
///
/// # Arguments
///
/// * `base` - The dataset root.
/// * `t1_path` - A path of the form `base/<subject>/<session>/anat/<t1>`.
pub fn extract_fields(
    base: impl AsRef<Path>,
    t1_path: impl AsRef<Path>,
) -> Result<T1Fields, InvocationError> {
    let base = base.as_ref();
    let t1_path = t1_path.as_ref();

    let relative = t1_path
        .strip_prefix(base)
        .map_err(|_| InvocationError::UnexpectedLayout(t1_path.to_path_buf()))?;

    match normal_components(relative).as_slice() {
        [subject, session, _anat, t1] => Ok(T1Fields {
            base: base.to_path_buf(),
            subject: subject.to_string(),
            session: session.to_string(),
            t1: t1.to_string(),
        }),
        _ => Err(InvocationError::UnexpectedLayout(t1_path.to_path_buf())),
    }
}

/// Group T1w scans by subject, keeping only sessions `ses-1` and `ses-2`.
pub fn extract_sessions(
    base: impl AsRef<Path>,
    t1_paths: &[PathBuf],
) -> Result<SubjectSessions, InvocationError> {
    let base = base.as_ref();
    let mut subject_t1_map = SubjectSessions::new();

    for t1 in t1_paths {
        let fields = extract_fields(base, t1)?;
        match fields.session.as_str() {
            "ses-1" => {
                subject_t1_map.entry(fields.subject).or_default().session_1 = Some(t1.clone());
            }
            "ses-2" => {
                subject_t1_map.entry(fields.subject).or_default().session_2 = Some(t1.clone());
            }
            other => log::debug!("Ignoring session {other} of {}", t1.display()),
        }
    }

    Ok(subject_t1_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_fields() -> Result<(), InvocationError> {
        let fields = extract_fields(
            "CORR",
            "CORR/sub-0025531/ses-1/anat/sub-0025531_ses-1_run-1_T1w.nii.gz",
        )?;
        assert_eq!(
            fields,
            T1Fields {
                base: PathBuf::from("CORR"),
                subject: "sub-0025531".to_string(),
                session: "ses-1".to_string(),
                t1: "sub-0025531_ses-1_run-1_T1w.nii.gz".to_string(),
            }
        );
        Ok(())
    }

    #[test]
    fn test_extract_fields_nested_base() -> Result<(), InvocationError> {
        let fields = extract_fields(
            "/data/CORR",
            "/data/CORR/sub-1/ses-2/anat/sub-1_ses-2_T1w.nii.gz",
        )?;
        assert_eq!(fields.subject, "sub-1");
        assert_eq!(fields.session, "ses-2");
        Ok(())
    }

    #[test]
    fn test_extract_fields_bad_layout() {
        assert!(matches!(
            extract_fields("CORR", "CORR/sub-1/anat/sub-1_T1w.nii.gz"),
            Err(InvocationError::UnexpectedLayout(_))
        ));
        assert!(matches!(
            extract_fields("CORR", "other/sub-1/ses-1/anat/sub-1_T1w.nii.gz"),
            Err(InvocationError::UnexpectedLayout(_))
        ));
    }

    #[test]
    fn test_extract_sessions() -> Result<(), InvocationError> {
        let t1s = [
            "CORR/sub-1/ses-1/anat/sub-1_ses-1_T1w.nii.gz",
            "CORR/sub-1/ses-2/anat/sub-1_ses-2_T1w.nii.gz",
            "CORR/sub-1/ses-3/anat/sub-1_ses-3_T1w.nii.gz",
            "CORR/sub-2/ses-1/anat/sub-2_ses-1_T1w.nii.gz",
        ]
        .map(PathBuf::from);

        let sessions = extract_sessions("CORR", &t1s)?;
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions["sub-1"].session_1.as_ref(), Some(&t1s[0]));
        assert_eq!(sessions["sub-1"].session_2.as_ref(), Some(&t1s[1]));
        assert_eq!(sessions["sub-2"].session_1.as_ref(), Some(&t1s[3]));
        assert_eq!(sessions["sub-2"].session_2, None);
        Ok(())
    }

    #[test]
    fn test_matches_t1_layout() {
        assert!(matches_t1_layout(Path::new(
            "sub-1/ses-1/anat/sub-1_ses-1_T1w.nii.gz"
        )));
        assert!(!matches_t1_layout(Path::new(
            "sub-1/ses-1/func/sub-1_ses-1_T1w.nii.gz"
        )));
        assert!(!matches_t1_layout(Path::new(
            "sub-1/ses-1/anat/sub-1_ses-1_T2w.nii.gz"
        )));
        assert!(!matches_t1_layout(Path::new(
            "derivatives/ses-1/anat/sub-1_ses-1_T1w.nii.gz"
        )));
    }
}
