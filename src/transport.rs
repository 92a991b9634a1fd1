//! Stdin transport - the producer side of the inbox queue.
//!
//! A detached thread reads expression names line by line from standard
//! input and pushes them into the inbox. The thread's lifecycle is
//! independent of playback: when stdin closes the thread simply exits and
//! the face keeps animating on its own.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::inbox::InboxSender;

/// Spawn the stdin reader thread.
///
/// Each non-empty trimmed line becomes one request. The returned handle may
/// be dropped; the thread needs no coordinated shutdown.
pub fn spawn_stdin_reader(sender: InboxSender) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("transport".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        let name = line.trim();
                        if !name.is_empty() {
                            sender.push(name);
                        }
                    }
                    Err(err) => {
                        tracing::debug!(%err, "Transport read failed");
                        break;
                    }
                }
            }
            tracing::debug!("Transport input closed");
        })?;
    Ok(handle)
}
