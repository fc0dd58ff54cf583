//! Output backends for emitting deltas.

use std::io::Write;

use tokio::sync::mpsc;
use tracing::warn;
use zonewatch_types::Delta;

/// Output destination for deltas.
#[derive(Debug)]
pub enum Output {
    /// Write each delta to stdout as one line of JSON.
    Stdout,

    /// Send deltas through a bounded channel.
    ///
    /// Use `Output::channel()` to create this variant and get the receiver.
    Channel(mpsc::Sender<Delta>),
}

impl Output {
    /// Create a channel output and return both the output and receiver.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zonewatch::Output;
    ///
    /// let (output, mut rx) = Output::channel(16);
    /// # let _ = (&output, &mut rx);
    ///
    /// // Later, receive deltas
    /// // while let Some(delta) = rx.recv().await {
    /// //     println!("{}", delta.context);
    /// // }
    /// ```
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Delta>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Output::Channel(tx), rx)
    }

    /// Emit a delta to this output (best effort).
    pub fn emit(&self, delta: &Delta) {
        match self {
            Output::Stdout => match serde_json::to_string(delta) {
                Ok(json) => {
                    let mut stdout = std::io::stdout().lock();
                    if let Err(e) = writeln!(stdout, "{}", json).and_then(|_| stdout.flush()) {
                        warn!("Failed to write delta to stdout: {}", e);
                    }
                }
                Err(e) => warn!("Failed to serialize delta: {}", e),
            },
            Output::Channel(tx) => {
                // Don't block if the channel is full
                if let Err(e) = tx.try_send(delta.clone()) {
                    warn!("Dropping delta for {}: {}", delta.context, e);
                }
            }
        }
    }
}
