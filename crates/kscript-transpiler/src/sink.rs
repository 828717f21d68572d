//! Logging sinks for transpiler diagnostics.

use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single message sent to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Receives messages produced while transpiling.
///
/// The editor host typically shows these in its console panel.
pub trait LogSink: Send {
    fn log(&self, message: &str, level: LogLevel);
}

/// Forwards messages to `tracing` under the `kscript` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "kscript", "{}", message),
            LogLevel::Info => tracing::info!(target: "kscript", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "kscript", "{}", message),
            LogLevel::Error => tracing::error!(target: "kscript", "{}", message),
        }
    }
}

/// Channel sink, for hosts that collect messages on another thread.
impl LogSink for Sender<LogRecord> {
    fn log(&self, message: &str, level: LogLevel) {
        // A disconnected receiver just means nobody is listening any more
        let _ = self.send(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}
