use std::io;

const LOG_FILE: &str = "drugmap-current.log";

// renderer and text shaping crates log per frame at debug
const QUIET_TARGETS: [&str; 4] = ["wgpu", "naga", "cosmic_text", "iced"];

pub fn setup(is_debug: bool) -> Result<(), fern::InitError> {
    let level = if is_debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level);

    for target in QUIET_TARGETS {
        dispatch = dispatch.level_for(target, log::LevelFilter::Warn);
    }

    let log_path = data::data_path(Some(LOG_FILE));
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    dispatch
        .chain(io::stdout())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    log::info!("Logging to {}", log_path.display());
    Ok(())
}
