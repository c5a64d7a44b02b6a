use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Install the global subscriber. Lines are appended to `log_path` without
/// colors; when the file cannot be opened, logs go to stderr instead.
pub fn init(log_path: &Path, level: Level) {
    if let Some(parent) = log_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        let _ = fs::create_dir_all(parent);
    }

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let result = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        Err(err) => {
            eprintln!("cannot open log file {}: {}", log_path.display(), err);
            builder.with_writer(std::io::stderr).try_init()
        }
    };

    if let Err(err) = result {
        eprintln!("logging already initialized: {}", err);
    }
}
