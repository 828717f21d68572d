//! KScript transpiler
//!
//! Turns KScript, the line-based live-coding syntax of the visualizer editor,
//! into JavaScript for the script evaluator. Buffers without the `#kscript`
//! marker are passed through untouched.

pub mod codegen;
pub mod driver;
pub mod error;
pub mod keywords;
pub mod sink;
pub mod split;
pub mod state;
pub mod values;

pub use codegen::{DEBUG_MARKER, LANGUAGE_MARKER, Transpilation, Transpiler, parse};
pub use driver::{CompileOptions, CompileOutput, Compiler};
pub use error::{Diagnostic, DiagnosticKind, Result, TranspileError};
pub use keywords::KeywordSet;
pub use sink::{LogLevel, LogRecord, LogSink, TracingSink};
pub use split::{safe_split_by_comma, safe_split_by_space};
pub use state::ParseState;
