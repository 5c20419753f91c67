use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tracing::info;

/// Shared stop flag checked by drivers between frames.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Whether a console line is exactly the quit key, surrounding whitespace
/// aside.
pub fn is_quit_command(line: &str, quit_key: &str) -> bool {
    line.trim() == quit_key
}

/// Reads lines until one equals `quit_key`, then raises `signal`. Returns
/// on end of input without raising.
pub fn watch_lines<R: BufRead>(reader: R, signal: &StopSignal, quit_key: &str) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        if is_quit_command(&line, quit_key) {
            info!("quit key received");
            signal.raise();
            break;
        }
    }
}

/// Background thread running [`watch_lines`] on stdin.
pub fn spawn_stdin_watcher(signal: StopSignal, quit_key: String) -> JoinHandle<()> {
    thread::spawn(move || watch_lines(io::stdin().lock(), &signal, &quit_key))
}
