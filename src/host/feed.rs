//! Newline-delimited JSON feed into a [`ChannelHost`].
//!
//! Each line is a `{"path": "...", "value": ...}` record. This lets the
//! binary be driven from stdin, a pipe or a TCP stream.

use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ChannelHost;

/// One value update for a signal path.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalUpdate {
    pub path: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl SignalUpdate {
    /// The value as a number. Anything non-numeric becomes NaN.
    pub fn numeric(&self) -> f64 {
        self.value.as_f64().unwrap_or(f64::NAN)
    }
}

/// Spawn a background task that reads updates from `reader` into `host`.
///
/// Lines that fail to parse and updates for undeclared paths are logged
/// and skipped. The task ends at EOF or on a read error.
pub fn spawn_feed<R>(reader: R, host: Arc<ChannelHost>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("Feed reached end of input");
                    break;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<SignalUpdate>(trimmed) {
                        Ok(update) => {
                            if let Err(e) = host.send(&update.path, update.numeric()) {
                                warn!("Skipping update: {}", e);
                            }
                        }
                        Err(e) => warn!("Parse error: {}", e),
                    }
                }
                Err(e) => {
                    warn!("Read error: {}", e);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Output;
    use std::io::Cursor;

    fn host() -> Arc<ChannelHost> {
        let (output, _rx) = Output::channel(1);
        let host = Arc::new(ChannelHost::new("self", output));
        host.declare("navigation.speedOverGround");
        host
    }

    #[test]
    fn non_numeric_values_become_nan() {
        let update: SignalUpdate =
            serde_json::from_str(r#"{"path": "a", "value": "fast"}"#).unwrap();
        assert!(update.numeric().is_nan());

        let update: SignalUpdate = serde_json::from_str(r#"{"path": "a"}"#).unwrap();
        assert!(update.numeric().is_nan());

        let update: SignalUpdate = serde_json::from_str(r#"{"path": "a", "value": 3}"#).unwrap();
        assert_eq!(update.numeric(), 3.0);
    }

    #[tokio::test]
    async fn test_feed_updates_declared_paths() {
        let host = host();
        let data = concat!(
            r#"{"path": "navigation.speedOverGround", "value": 3.5}"#,
            "\n",
            r#"{"path": "navigation.speedOverGround", "value": 4.25}"#,
            "\n"
        );

        spawn_feed(Cursor::new(data), host.clone()).await.unwrap();
        assert_eq!(host.latest("navigation.speedOverGround"), Some(4.25));
    }

    #[tokio::test]
    async fn test_feed_skips_bad_lines_and_unknown_paths() {
        let host = host();
        let data = concat!(
            "not valid json\n",
            "\n",
            r#"{"path": "environment.wind.speedApparent", "value": 12}"#,
            "\n",
            r#"{"path": "navigation.speedOverGround", "value": 1}"#,
            "\n"
        );

        spawn_feed(Cursor::new(data), host.clone()).await.unwrap();
        assert_eq!(host.latest("navigation.speedOverGround"), Some(1.0));
        assert_eq!(host.paths().len(), 1);
    }
}
