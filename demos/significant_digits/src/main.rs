use argh::FromArgs;
use std::path::PathBuf;

use fslrepro::sigdigits::{self, FileMode, SigDigitsConfig};

#[derive(FromArgs, Debug)]
/// Compute the significant digits of repeated FLIRT transformation matrices.
struct Args {
    /// results directory
    #[argh(option, default = "PathBuf::from(\"results\")")]
    input_directory: PathBuf,

    /// output directory
    #[argh(option, default = "PathBuf::from(\"results/significantdigits\")")]
    output_directory: PathBuf,

    /// base of the reported digits, 2 for bits or 10 for decimal digits
    #[argh(option, default = "2.0")]
    basis: f64,

    /// apply the legacy 644/755 permissions, read as decimal
    #[argh(switch)]
    legacy_permissions: bool,

    /// print the results instead of writing them
    #[argh(switch)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mode = if args.legacy_permissions {
        FileMode::Legacy
    } else {
        FileMode::Intended
    };
    let config = SigDigitsConfig {
        basis: args.basis,
        ..Default::default()
    };

    let subjects_mat_files = sigdigits::parse_mat_files(&args.input_directory);

    if args.dry_run {
        for (subject, mat_files) in &subjects_mat_files {
            println!("{subject}");
            for mat_file in mat_files {
                println!(" - {}", mat_file.display());
            }
        }
    } else {
        sigdigits::create_output_directory(&args.output_directory, mode)?;
    }

    let significant_digits = sigdigits::compute_significant_digits(&subjects_mat_files, &config)?;
    for (subject, sig) in &significant_digits {
        if args.dry_run {
            println!("{subject}:\n{}", sig.to_text());
        } else {
            let output_file = args.output_directory.join(format!("{subject}.txt"));
            sigdigits::write_significant_digits(sig, &output_file, mode)?;
            log::info!("{subject}: {}", output_file.display());
        }
    }

    Ok(())
}
