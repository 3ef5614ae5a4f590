//! Invocation generation over a small on-disk dataset.

use std::fs;
use std::path::{Path, PathBuf};

use fslrepro_invocation::{
    find_t1s, generate, Invocation, InvocationConfig, InvocationError,
};

fn touch(root: &Path, relative: &str) -> std::io::Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, b"")?;
    Ok(path)
}

fn dataset(root: &Path) -> std::io::Result<()> {
    for relative in [
        "sub-0025531/ses-1/anat/sub-0025531_ses-1_run-1_T1w.nii.gz",
        "sub-0025531/ses-2/anat/sub-0025531_ses-2_run-1_T1w.nii.gz",
        "sub-0025532/ses-1/anat/sub-0025532_ses-1_run-1_T1w.nii.gz",
        "sub-0025532/ses-2/anat/sub-0025532_ses-2_run-1_T1w.nii.gz",
        // not picked up
        "sub-0025532/ses-2/func/sub-0025532_ses-2_bold.nii.gz",
        "sub-0025532/ses-2/anat/sub-0025532_ses-2_run-1_T1w.json",
        "participants.tsv",
    ] {
        touch(root, relative)?;
    }
    Ok(())
}

#[test]
fn find_t1s_filters_layout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    dataset(dir.path())?;

    let t1s = find_t1s(dir.path());
    assert_eq!(t1s.len(), 4);
    assert!(t1s.windows(2).all(|w| w[0] <= w[1]));
    assert!(t1s
        .iter()
        .all(|p| p.to_string_lossy().ends_with("_T1w.nii.gz")));
    Ok(())
}

#[cfg(unix)]
#[test]
fn find_t1s_follows_symlinks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let annex = touch(dir.path(), ".git/annex/objects/MD5E-s0--d41d8.nii.gz")?;
    let base = dir.path().join("CORR");
    let anat = base.join("sub-1/ses-1/anat");
    fs::create_dir_all(&anat)?;
    let link = anat.join("sub-1_ses-1_T1w.nii.gz");
    std::os::unix::fs::symlink(&annex, &link)?;

    assert_eq!(find_t1s(&base), vec![link]);
    Ok(())
}

#[test]
fn generate_ieee_and_mca() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("CORR");
    dataset(&base)?;

    let config = InvocationConfig {
        base: base.clone(),
        invocations_directory: dir.path().join("invocations"),
        output_directory: dir.path().join("results"),
        mca_repetitions: 3,
        dry_run: false,
    };

    let (sessions, written) = generate(&config)?;
    assert_eq!(sessions.len(), 2);
    // two subjects, one IEEE run and three MCA repetitions
    assert_eq!(written.len(), 2 * 4);

    assert!(dir.path().join("results/ieee").is_dir());
    for i in 1..=3 {
        assert!(dir.path().join(format!("results/mca/{i}")).is_dir());
    }

    let path = dir.path().join("invocations/mca/2/sub-0025531.json");
    let invocation: Invocation = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(
        invocation.in_file,
        base.join("sub-0025531/ses-1/anat/sub-0025531_ses-1_run-1_T1w.nii.gz")
    );
    assert_eq!(
        invocation.reference,
        base.join("sub-0025531/ses-2/anat/sub-0025531_ses-2_run-1_T1w.nii.gz")
    );
    assert_eq!(
        invocation.out_mat_filename,
        dir.path().join("results/mca/2/sub-0025531.mat")
    );
    Ok(())
}

#[test]
fn dry_run_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("CORR");
    dataset(&base)?;

    let config = InvocationConfig {
        base,
        invocations_directory: dir.path().join("invocations"),
        output_directory: dir.path().join("results"),
        mca_repetitions: 2,
        dry_run: true,
    };

    let (_, written) = generate(&config)?;
    assert_eq!(written.len(), 2 * 3);
    assert!(!dir.path().join("invocations").exists());
    assert!(!dir.path().join("results").exists());
    Ok(())
}

#[test]
fn subject_without_second_session_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("CORR");
    dataset(&base)?;
    touch(&base, "sub-0025533/ses-1/anat/sub-0025533_ses-1_run-1_T1w.nii.gz")?;

    let config = InvocationConfig {
        base,
        invocations_directory: dir.path().join("invocations"),
        output_directory: dir.path().join("results"),
        mca_repetitions: 1,
        dry_run: true,
    };

    let err = generate(&config).unwrap_err();
    assert!(matches!(
        err,
        InvocationError::MissingSession { ref subject, .. } if subject == "sub-0025533"
    ));
    Ok(())
}
