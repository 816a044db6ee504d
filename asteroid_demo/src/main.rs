//! Asteroid field demo
//!
//! Usage:
//!
//! - `asteroid_field [CONFIG]` runs the demo. `CONFIG` is an optional
//!   `.toml` or `.ron` file.
//! - `asteroid_field --write-config PATH` writes the default configuration
//!   to `PATH` as a template and exits.
//!
//! Without the `glfw` feature the demo runs headless for the configured
//! number of frames, fed by the scripted key frames.

use asteroid_demo::{AppError, AsteroidDemo, DemoConfig};
use field_engine::config::Config;
use field_engine::foundation::logging;

fn main() {
    logging::init();

    if let Err(err) = run() {
        log::error!("Asteroid demo failed: {}", err);
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--write-config") => {
            let path = args
                .next()
                .ok_or_else(|| AppError::Config("--write-config needs a file path".to_string()))?;
            DemoConfig::default().save_to_file(&path)?;
            log::info!("Wrote default configuration to {}", path);
            return Ok(());
        }
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            DemoConfig::load_from_file(path)?
        }
        None => DemoConfig::default(),
    };

    let count = config.field.count;
    let mut demo = create_demo(config)?;
    demo.create_cube()?;
    demo.create_icosahedron()?;
    demo.create_asteroid_field(count)?;
    demo.main_loop()?;

    log::info!("Asteroid demo exited cleanly");
    Ok(())
}

#[cfg(feature = "glfw")]
fn create_demo(config: DemoConfig) -> Result<AsteroidDemo, AppError> {
    let platform = field_engine::platform::GlfwPlatform::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;
    AsteroidDemo::init(config, platform)
}

#[cfg(not(feature = "glfw"))]
fn create_demo(config: DemoConfig) -> Result<AsteroidDemo, AppError> {
    log::info!("Running headless (build with --features glfw for a window)");
    let platform = asteroid_demo::app::headless_platform(&config);
    AsteroidDemo::init(config, platform)
}
