use std::fs;
use std::path::Path;

use crate::error::SigDigitsError;
use crate::table::Matrix;

/// Permission bits applied to written results.
///
/// The legacy batch tool passed `644` and `755` to `chmod`/`makedirs` as decimal
/// literals, i.e. modes `0o1204` and `0o1363`. [`FileMode::Legacy`] reproduces those
/// bits; [`FileMode::Intended`] applies `rw-r--r--` and `rwxr-xr-x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileMode {
    /// `0o644` for files, `0o755` for directories.
    #[default]
    Intended,
    /// Decimal `644` for files, decimal `755` for directories.
    Legacy,
}

impl FileMode {
    /// Mode bits of result files.
    pub fn file_mode(self) -> u32 {
        match self {
            FileMode::Intended => 0o644,
            FileMode::Legacy => 644,
        }
    }

    /// Mode bits of the output directory.
    pub fn dir_mode(self) -> u32 {
        match self {
            FileMode::Intended => 0o755,
            FileMode::Legacy => 755,
        }
    }
}

/// Create the output directory and its parents if missing.
///
/// New directories get [`FileMode::dir_mode`], subject to the process umask.
pub fn create_output_directory(
    path: impl AsRef<Path>,
    mode: FileMode,
) -> Result<(), SigDigitsError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode.dir_mode());
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)?;
    Ok(())
}

/// Write significant digits as text and set the file mode.
pub fn write_significant_digits(
    significant_digits: &Matrix,
    output_file: impl AsRef<Path>,
    mode: FileMode,
) -> Result<(), SigDigitsError> {
    let output_file = output_file.as_ref();
    fs::write(output_file, significant_digits.to_text())?;
    set_mode(output_file, mode.file_mode())?;
    log::debug!("Wrote {}", output_file.display());
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
