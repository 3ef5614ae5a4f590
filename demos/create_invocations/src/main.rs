use argh::FromArgs;
use std::path::PathBuf;

use fslrepro::invocation::{self, InvocationConfig};

#[derive(FromArgs, Debug)]
/// Create FLIRT invocations for IEEE and MCA runs.
struct Args {
    /// base directory of the dataset
    #[argh(option, default = "PathBuf::from(\"CORR\")")]
    base: PathBuf,

    /// invocations directory
    #[argh(option, default = "PathBuf::from(\"invocations\")")]
    invocations_directory: PathBuf,

    /// results directory
    #[argh(option, default = "PathBuf::from(\"results\")")]
    output_directory: PathBuf,

    /// number of repetitions for MCA
    #[argh(option, default = "10")]
    mca_repetitions: usize,

    /// print the invocations instead of writing them
    #[argh(switch)]
    dry_run: bool,
}

impl From<Args> for InvocationConfig {
    fn from(args: Args) -> Self {
        Self {
            base: args.base,
            invocations_directory: args.invocations_directory,
            output_directory: args.output_directory,
            mca_repetitions: args.mca_repetitions,
            dry_run: args.dry_run,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config: InvocationConfig = argh::from_env::<Args>().into();

    let t1s = invocation::find_t1s(&config.base);
    let subject_t1_map = invocation::extract_sessions(&config.base, &t1s)?;

    if config.dry_run {
        for (subject, sessions) in &subject_t1_map {
            for (session, t1) in [
                ("session-1", &sessions.session_1),
                ("session-2", &sessions.session_2),
            ] {
                if let Some(t1) = t1 {
                    println!("{subject} {session} {}", t1.display());
                }
            }
        }
    }

    let written = invocation::create_flirt_invocations(&subject_t1_map, &config)?;
    log::info!(
        "{} invocations for {} subjects",
        written.len(),
        subject_t1_map.len()
    );

    Ok(())
}
