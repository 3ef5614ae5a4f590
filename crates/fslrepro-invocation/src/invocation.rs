use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discovery::{extract_sessions, find_t1s, Sessions, SubjectSessions};
use crate::error::InvocationError;

/// Arguments of one FLIRT run, as consumed by the job runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// The moving image (session 1).
    pub in_file: PathBuf,
    /// The reference image (session 2).
    pub reference: PathBuf,
    /// The registered image.
    #[serde(alias = "out_file")]
    pub out_filename: PathBuf,
    /// The estimated transformation matrix.
    #[serde(alias = "out_mat_file")]
    pub out_mat_filename: PathBuf,
}

/// Settings of an invocation generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationConfig {
    /// Dataset root holding `sub-*/ses-*/anat` scans.
    pub base: PathBuf,
    /// Where invocation files are written.
    pub invocations_directory: PathBuf,
    /// Where FLIRT will write its results.
    pub output_directory: PathBuf,
    /// Number of MCA repetitions.
    pub mca_repetitions: usize,
    /// Print instead of writing.
    pub dry_run: bool,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from("CORR"),
            invocations_directory: PathBuf::from("invocations"),
            output_directory: PathBuf::from("results"),
            mca_repetitions: 10,
            dry_run: false,
        }
    }
}

/// Build the FLIRT invocation registering session 1 onto session 2 of a subject.
///
/// # Arguments
///
/// * `subject` - The subject label.
/// * `sessions` - The scans of the subject.
/// * `output_directory` - Where FLIRT writes `<subject>.nii.gz` and `<subject>.mat`.
pub fn create_flirt_invocation(
    subject: &str,
    sessions: &Sessions,
    output_directory: impl AsRef<Path>,
) -> Result<Invocation, InvocationError> {
    let output_directory = output_directory.as_ref();

    let missing = |session| InvocationError::MissingSession {
        subject: subject.to_string(),
        session,
    };
    let in_file = sessions.session_1.clone().ok_or_else(|| missing("session-1"))?;
    let reference = sessions.session_2.clone().ok_or_else(|| missing("session-2"))?;

    Ok(Invocation {
        in_file,
        reference,
        out_filename: output_directory.join(format!("{subject}.nii.gz")),
        out_mat_filename: output_directory.join(format!("{subject}.mat")),
    })
}

/// Serialize an invocation as 4-space indented JSON.
pub fn to_json_writer<W: Write>(writer: W, invocation: &Invocation) -> Result<(), InvocationError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    invocation.serialize(&mut serializer)?;
    Ok(())
}

/// Write an invocation to `output_dir/output_file`.
///
/// With `dry_run` the target path and the JSON are printed to stdout and nothing is
/// written. Otherwise `output_dir` is created when missing.
///
/// # Returns
///
/// The path of the invocation file.
pub fn write_invocation(
    invocation: &Invocation,
    output_dir: impl AsRef<Path>,
    output_file: &str,
    dry_run: bool,
) -> Result<PathBuf, InvocationError> {
    let output_path = output_dir.as_ref().join(output_file);

    if dry_run {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "\nwrite invocation in {}", output_path.display())?;
        to_json_writer(&mut handle, invocation)?;
        writeln!(handle)?;
        return Ok(output_path);
    }

    fs::create_dir_all(output_dir.as_ref())?;
    let mut writer = BufWriter::new(File::create(&output_path)?);
    to_json_writer(&mut writer, invocation)?;
    writer.flush()?;

    log::debug!("Wrote invocation {}", output_path.display());

    Ok(output_path)
}

// run types, also the directory names
const IEEE: &str = "ieee";
const MCA: &str = "mca";

fn dry_run_banner(run_type: &str, results_dir: &Path) -> String {
    format!("\ncreate {run_type} invocations in {}", results_dir.display())
}

fn create_invocations_in(
    run_type: &str,
    subject_t1_map: &SubjectSessions,
    invocations_dir: &Path,
    results_dir: &Path,
    dry_run: bool,
) -> Result<Vec<PathBuf>, InvocationError> {
    if dry_run {
        println!("{}", dry_run_banner(run_type, results_dir));
    } else {
        fs::create_dir_all(results_dir)?;
    }

    let written = subject_t1_map
        .iter()
        .map(|(subject, sessions)| {
            let invocation = create_flirt_invocation(subject, sessions, results_dir)?;
            write_invocation(
                &invocation,
                invocations_dir,
                &format!("{subject}.json"),
                dry_run,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!(
        "{} {run_type} invocations for results in {}",
        written.len(),
        results_dir.display()
    );

    Ok(written)
}

/// Create the invocations of the deterministic (IEEE) run.
///
/// Results go to `results_directory/ieee`, invocation files to
/// `invocations_directory/ieee/<subject>.json`.
pub fn create_ieee_invocations(
    subject_t1_map: &SubjectSessions,
    invocations_directory: impl AsRef<Path>,
    results_directory: impl AsRef<Path>,
    dry_run: bool,
) -> Result<Vec<PathBuf>, InvocationError> {
    create_invocations_in(
        IEEE,
        subject_t1_map,
        &invocations_directory.as_ref().join(IEEE),
        &results_directory.as_ref().join(IEEE),
        dry_run,
    )
}

/// Create the invocations of the MCA repetitions `1..=repetitions`.
///
/// Repetition `i` uses `results_directory/mca/<i>` and `invocations_directory/mca/<i>`.
pub fn create_mca_invocations(
    subject_t1_map: &SubjectSessions,
    invocations_directory: impl AsRef<Path>,
    results_directory: impl AsRef<Path>,
    repetitions: usize,
    dry_run: bool,
) -> Result<Vec<PathBuf>, InvocationError> {
    let mut written = Vec::new();
    for i in 1..=repetitions {
        let repetition = i.to_string();
        written.extend(create_invocations_in(
            MCA,
            subject_t1_map,
            &invocations_directory.as_ref().join(MCA).join(&repetition),
            &results_directory.as_ref().join(MCA).join(&repetition),
            dry_run,
        )?);
    }
    Ok(written)
}

/// Create the IEEE and MCA invocations described by `config`.
pub fn create_flirt_invocations(
    subject_t1_map: &SubjectSessions,
    config: &InvocationConfig,
) -> Result<Vec<PathBuf>, InvocationError> {
    let mut written = create_ieee_invocations(
        subject_t1_map,
        &config.invocations_directory,
        &config.output_directory,
        config.dry_run,
    )?;
    written.extend(create_mca_invocations(
        subject_t1_map,
        &config.invocations_directory,
        &config.output_directory,
        config.mca_repetitions,
        config.dry_run,
    )?);
    Ok(written)
}

/// Discover the scans under `config.base` and create all invocations.
///
/// # Returns
///
/// The discovered sessions and the invocation file paths.
pub fn generate(
    config: &InvocationConfig,
) -> Result<(SubjectSessions, Vec<PathBuf>), InvocationError> {
    let t1s = find_t1s(&config.base);
    let subject_t1_map = extract_sessions(&config.base, &t1s)?;
    let written = create_flirt_invocations(&subject_t1_map, config)?;
    Ok((subject_t1_map, written))
}
