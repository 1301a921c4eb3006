use crate::numerical::quadrature::sample_grid::SampleGrid;
use chrono::Local;
use csv::Writer;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// maps "debug", "info", "warn", "error", "off"/"none" to a level filter
pub fn level_filter(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" => Some(LevelFilter::Warn),
        "error" => Some(LevelFilter::Error),
        "off" | "none" => Some(LevelFilter::Off),
        _ => None,
    }
}

/// `log_<date>_<time>.txt` in the working directory
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs a terminal logger and, if `log_file` is given, a file logger with the same level.
///
/// Returns `Ok(false)` when nothing was installed: the level is `Off` or a logger is already
/// set (repeated runs in one process keep the first logger).
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> io::Result<bool> {
    if level == LevelFilter::Off {
        return Ok(false);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(level, Config::default(), File::create(path)?));
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}

/// writes the grid as tab separated columns `x` and `value_header`
pub fn save_grid_to_file(grid: &SampleGrid, value_header: &str, filename: &Path) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "x\t{}", value_header)?;
    for (x, y) in grid.x().iter().zip(grid.y().iter()) {
        writeln!(file, "{}\t{}", x, y)?;
    }
    Ok(())
}

pub fn save_grid_to_csv(grid: &SampleGrid, value_header: &str, filename: &Path) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["x", value_header])?;
    for (x, y) in grid.x().iter().zip(grid.y().iter()) {
        writer.write_record([x.to_string(), y.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
