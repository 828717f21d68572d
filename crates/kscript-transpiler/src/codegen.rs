//! Code generation module
//!
//! Transforms KScript source, line by line, into JavaScript.

use crate::error::{Diagnostic, Result, TranspileError};
use crate::keywords::KeywordSet;
use crate::sink::{LogLevel, LogSink, TracingSink};
use crate::split::{contains_unquoted, safe_split_statements, unquoted_chars};
use crate::state::ParseState;
use crate::values::{ValueReducer, is_identifier};

/// Directive that marks a buffer as KScript. Anything else is passed through.
pub const LANGUAGE_MARKER: &str = "#kscript";
/// Directive that turns on per-statement trace logging.
pub const DEBUG_MARKER: &str = "#debug";

const COMMENT_MARKER: &str = "//";

/// Statements that close a `name:` block.
const BLOCK_CLOSERS: &[&str] = &["end", "end setup", "end draw", "end block"];
/// Statements that close an `if`/`while`/`for` body without leaving the block.
const CONTROL_CLOSERS: &[&str] = &["end if", "end while", "end for"];

/// Operators that may precede `=` in a compound assignment.
const COMPOUND_OPERATORS: &[char] = &['+', '-', '*', '/', '%', '&', '|', '^'];

/// Result of a single transpilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpilation {
    /// Generated JavaScript, or the untouched input when `transpiled` is false
    pub code: String,
    /// Statements that failed and were replaced by comment lines
    pub diagnostics: Vec<Diagnostic>,
    /// Names declared by the source, sorted
    pub declared_names: Vec<String>,
    /// Whether the input carried the language marker
    pub transpiled: bool,
}

/// KScript to JavaScript transpiler
pub struct Transpiler {
    /// Host built-ins that are never coerced to strings
    keywords: KeywordSet,
    /// Where diagnostics and debug traces go
    sink: Box<dyn LogSink>,
    /// Bookkeeping for the current `parse` call
    state: ParseState,
    /// Failures collected during the current `parse` call
    diagnostics: Vec<Diagnostic>,
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler {
    /// Create a transpiler with the built-in keyword list that logs through `tracing`
    pub fn new() -> Self {
        Self::with_keywords(KeywordSet::builtin())
    }

    pub fn with_keywords(keywords: KeywordSet) -> Self {
        Self {
            keywords,
            sink: Box::new(TracingSink),
            state: ParseState::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Replace the logging sink
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut KeywordSet {
        &mut self.keywords
    }

    /// State left behind by the most recent `parse` call
    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// Diagnostics collected by the most recent `parse` call
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Transpile a buffer and return the generated code.
    ///
    /// Buffers that do not start with [`LANGUAGE_MARKER`] are returned as-is.
    /// Statement failures never abort the parse; they become comment lines.
    pub fn parse(&mut self, source: &str) -> String {
        self.transpile(source).code
    }

    /// Like [`Transpiler::parse`], but also reports diagnostics and declared names.
    pub fn transpile(&mut self, source: &str) -> Transpilation {
        if !source.trim().starts_with(LANGUAGE_MARKER) {
            self.diagnostics.clear();
            return Transpilation {
                code: source.to_string(),
                diagnostics: Vec::new(),
                declared_names: Vec::new(),
                transpiled: false,
            };
        }

        self.state.reset();
        self.diagnostics.clear();

        let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
        // Only a line consisting of the marker is a directive
        let (directives, lines): (Vec<&str>, Vec<&str>) = normalized
            .split('\n')
            .partition(|line| line.trim() == DEBUG_MARKER);
        self.state.debug_enabled = !directives.is_empty();

        let body = lines.join("\n");
        let body = body.trim();
        let body = body.strip_prefix(LANGUAGE_MARKER).unwrap_or(body).trim();

        let mut output: Vec<String> = Vec::new();
        for line in body.split('\n') {
            self.state.current_line += 1;
            self.emit_line(line, &mut output);
        }

        if self.state.debug_enabled {
            self.sink.log(
                &format!(
                    "transpiled {} line(s), {} error(s)",
                    self.state.current_line,
                    self.diagnostics.len()
                ),
                LogLevel::Debug,
            );
        }

        let mut declared_names: Vec<String> = self.state.declared_names.iter().cloned().collect();
        declared_names.sort();

        Transpilation {
            code: output.join("\n"),
            diagnostics: self.diagnostics.clone(),
            declared_names,
            transpiled: true,
        }
    }

    /// Transform one source line, pushing zero or more output lines
    fn emit_line(&mut self, line: &str, output: &mut Vec<String>) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            output.push(String::new());
            return;
        }
        if trimmed.starts_with(COMMENT_MARKER) {
            output.push(line.to_string());
            return;
        }

        // C-style `for` headers carry their own semicolons
        if !trimmed.starts_with("for ") && contains_unquoted(trimmed, ';') {
            if let Ok(statements) = safe_split_statements(trimmed, self.state.current_line) {
                for statement in statements {
                    let statement = statement.trim();
                    if !statement.is_empty() {
                        output.push(self.transform_statement(statement));
                    }
                }
                return;
            }
        }

        output.push(self.transform_statement(trimmed));
    }

    /// Run `parse_line`, replacing a failure with a diagnostic comment
    fn transform_statement(&mut self, statement: &str) -> String {
        match self.parse_line(statement) {
            Ok(js) => {
                if self.state.debug_enabled {
                    self.sink.log(
                        &format!("line {}: {} => {}", self.state.current_line, statement, js),
                        LogLevel::Debug,
                    );
                }
                js
            }
            Err(err) => {
                match err.to_diagnostic(statement) {
                    Some(diagnostic) => {
                        self.sink.log(&diagnostic.to_string(), LogLevel::Error);
                        self.diagnostics.push(diagnostic);
                    }
                    None => self.sink.log(&err.to_string(), LogLevel::Error),
                }
                format!(
                    "{} KScript parse error on line {}: {}",
                    COMMENT_MARKER, self.state.current_line, statement
                )
            }
        }
    }

    /// Transform a single trimmed, semicolon-free statement into one line of JavaScript.
    pub fn parse_line(&mut self, statement: &str) -> Result<String> {
        let statement = statement.trim();

        if let Some(header) = statement.strip_suffix(':') {
            return Ok(self.open_block(header.trim()));
        }

        if BLOCK_CLOSERS.contains(&statement) {
            self.state.exit_block();
            return Ok("}".to_string());
        }
        if CONTROL_CLOSERS.contains(&statement) {
            return Ok("}".to_string());
        }

        if let Some(header) = control_flow_header(statement) {
            return Ok(header);
        }

        if let Some(assignment) = split_assignment(statement) {
            return self.generate_assignment(assignment);
        }

        let value = self.process_complex_values(statement)?;
        Ok(format!("{};", value))
    }

    /// Reduce a value or bare statement (see [`ValueReducer::process`])
    pub fn process_complex_values(&self, value: &str) -> Result<String> {
        ValueReducer::new(&self.keywords, &self.state).process(value)
    }

    /// Generate the function header for a `name:` line
    fn open_block(&mut self, name: &str) -> String {
        let header = if name == "setup" {
            "function setup() {".to_string()
        } else if name == "draw" {
            self.state.declare("time");
            "function draw(time) {".to_string()
        } else if let Some(rest) = name.strip_prefix("block ") {
            self.function_header(rest.trim())
        } else if let Some(rest) = name.strip_prefix("block:") {
            format!("function {}() {{", rest.trim())
        } else if name.contains(',') {
            self.function_header(name)
        } else {
            format!("function {}() {{", name)
        };

        self.state.enter_block();
        header
    }

    /// `name` or `name, a, b` -> `function name(a, b) {`
    fn function_header(&mut self, signature: &str) -> String {
        let Some((name, params)) = signature.split_once(',') else {
            return format!("function {}() {{", signature);
        };
        let params = params.trim();

        for param in params.split(',') {
            // Default values (`size = 10`) still bind the name on the left
            let param = param.split('=').next().unwrap_or_default().trim();
            if is_identifier(param) {
                self.state.declare(param);
            }
        }

        format!("function {}({}) {{", name.trim(), params)
    }

    fn generate_assignment(&mut self, assignment: Assignment<'_>) -> Result<String> {
        let Assignment { target, operator, value } = assignment;

        if target.is_empty() {
            return Err(TranspileError::value(
                self.state.current_line,
                "assignment has no target",
            ));
        }

        let value = self.process_complex_values(value)?;

        if let Some(op) = operator {
            return Ok(format!("{} {}= {};", target, op, value));
        }

        if !is_identifier(target) {
            return Ok(format!("{} = {};", target, value));
        }

        if self.state.inside_block {
            if self.state.declare(target) {
                Ok(format!("let {} = {};", target, value))
            } else {
                Ok(format!("{} = {};", target, value))
            }
        } else {
            // Top-level redeclaration is allowed; `var` tolerates it
            self.state.declare(target);
            Ok(format!("var {} = {};", target, value))
        }
    }
}

/// Transpile a buffer with a fresh default transpiler
pub fn parse(source: &str) -> String {
    Transpiler::new().parse(source)
}

/// `if`/`else if`/`else`/`while`/`for` headers
fn control_flow_header(statement: &str) -> Option<String> {
    if statement == "else" {
        return Some("} else {".to_string());
    }
    if let Some(cond) = statement.strip_prefix("else if ") {
        return Some(format!("}} else if ({}) {{", cond.trim()));
    }
    if let Some(cond) = statement.strip_prefix("if ") {
        return Some(format!("if ({}) {{", cond.trim()));
    }
    if let Some(cond) = statement.strip_prefix("while ") {
        return Some(format!("while ({}) {{", cond.trim()));
    }
    if let Some(iter) = statement.strip_prefix("for ") {
        return Some(format!("for ({}) {{", iter.trim()));
    }
    None
}

/// An assignment statement split at its `=`
#[derive(Debug, PartialEq, Eq)]
struct Assignment<'a> {
    target: &'a str,
    /// Operator of a compound assignment such as `+=`
    operator: Option<char>,
    value: &'a str,
}

/// Find the first unquoted `=` that is not part of `==`, `<=`, `>=`, `!=` or `=>`.
fn split_assignment(statement: &str) -> Option<Assignment<'_>> {
    for (pos, ch) in unquoted_chars(statement) {
        if ch != '=' {
            continue;
        }
        let before = &statement[..pos];
        let after = &statement[pos + 1..];

        if matches!(after.chars().next(), Some('=' | '>')) {
            continue;
        }
        match before.chars().next_back() {
            Some('=' | '<' | '>' | '!') => continue,
            Some(op) if COMPOUND_OPERATORS.contains(&op) => {
                return Some(Assignment {
                    target: before[..before.len() - op.len_utf8()].trim(),
                    operator: Some(op),
                    value: after.trim(),
                });
            }
            _ => {
                return Some(Assignment {
                    target: before.trim(),
                    operator: None,
                    value: after.trim(),
                });
            }
        }
    }
    None
}
