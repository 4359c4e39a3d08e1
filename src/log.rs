// src/log.rs
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

static LOG_DIR: &str = ".sx";
static LOG_FILE: &str = ".sx/debug.log";
static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();

/// Internal logging function. Best-effort: an unwritable log file must
/// never disturb the run.
pub fn write_log(level: &str, msg: &str) {
    let t = START.get_or_init(Instant::now).elapsed();
    let line = format!("[{:>10.3}][{level}] {msg}\n", t.as_secs_f64());

    if let Ok(_guard) = LOG_LOCK.lock() {
        let _ = fs::create_dir_all(LOG_DIR);
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}
