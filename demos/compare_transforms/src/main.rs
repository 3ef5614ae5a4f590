use argh::FromArgs;
use std::path::PathBuf;

use fslrepro::transform::{self as ft, PoseVector};

#[derive(FromArgs, Debug)]
/// Print the pose vector of a FLIRT matrix, or the residual between two matrices.
struct Args {
    /// path to the reference transformation matrix
    #[argh(option, short = 'r')]
    reference: PathBuf,

    /// path to the transformation matrix compared against the reference
    #[argh(option, short = 'm')]
    moving: Option<PathBuf>,

    /// print the angle and axis of the rotation
    #[argh(switch)]
    angle_axis: bool,

    /// print the pose vector as JSON
    #[argh(switch)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let reference = ft::read_transform(&args.reference)?;

    // the residual transform when a second matrix is given
    let transform = match &args.moving {
        Some(moving) => ft::compare::residual(&reference, &ft::read_transform(moving)?)?,
        None => reference,
    };
    let pose: PoseVector = ft::to_pose_vector(&transform);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pose)?);
    } else {
        println!("[tx, ty, tz, rx, ry, rz]: {pose}");
    }

    if args.angle_axis {
        match ft::rotation_angle_axis(&transform.rotation()) {
            Ok(axis_angle) => println!(
                "angle: {:e} rad, axis: {:?}",
                axis_angle.angle, axis_angle.axis
            ),
            Err(e) => {
                log::warn!("{e}");
                println!(
                    "angle: {:e} rad, axis: undefined",
                    ft::euler::rotation_angle(&transform.rotation())
                );
            }
        }
    }

    Ok(())
}
