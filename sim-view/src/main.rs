//! Application entry point for the 3D DLA viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Log verbosity is taken from `RUST_LOG` (e.g. `RUST_LOG=dla_core=debug`).
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or the engine
///   cannot be constructed.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "3D DLA",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()?))),
    )
}
