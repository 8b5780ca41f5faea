//! Projects a few world points through a pinhole camera.
//!
//! Run with `RUST_LOG=debug` to see the matrices as they are set.

use pinhole::*;

fn main() -> Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => CameraOptions::from_json_file(path)?,
        None => CameraOptions::default(),
    };
    let camera = CameraTransform::from_options(&options)?;

    println!("{}", camera.world_to_camera());
    println!("{}", camera.calibration());

    let points = [
        DVec3::ZERO,
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.5, -0.5, -2.0),
    ];
    for point in points {
        let projected = camera.project_point(point)?;
        match camera.image_point(point) {
            Ok(pixel) => println!(
                "{point:?} -> pixel ({:.2}, {:.2}) depth {:.3}",
                pixel.x, pixel.y, projected.z
            ),
            Err(e) => println!("{point:?} -> {e}"),
        }
    }

    Ok(())
}
