//! Compiler driver: reads a KScript file, transpiles it and writes the result

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::codegen::Transpiler;
use crate::error::{Diagnostic, Result, TranspileError};
use crate::keywords::KeywordSet;
use crate::values::is_identifier;

/// Path that stands for standard input
const STDIN_PATH: &str = "-";

/// Compilation output structure
#[derive(Debug)]
pub struct CompileOutput {
    /// Source file that was compiled (`-` for stdin)
    pub source_file: PathBuf,
    /// Source code as read
    pub source: String,
    /// Generated JavaScript (the source itself when it had no `#kscript` marker)
    pub javascript: String,
    /// Statements that failed and were commented out
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the source carried the `#kscript` marker
    pub transpiled: bool,
}

/// Options for compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Input source file, or `-` for stdin
    pub input: PathBuf,
    /// Output file; the caller prints the code when absent
    pub output: Option<PathBuf>,
    /// Whether to log progress at info level
    pub verbose: bool,
    /// Extra built-in names, one per line
    pub keywords_file: Option<PathBuf>,
    /// Fail the compilation if any statement produced a diagnostic
    pub deny_errors: bool,
}

impl CompileOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            verbose: false,
            keywords_file: None,
            deny_errors: false,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn keywords_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.keywords_file = Some(path.into());
        self
    }

    pub fn deny_errors(mut self, deny: bool) -> Self {
        self.deny_errors = deny;
        self
    }
}

/// The KScript compiler
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Create a new compiler with the given options
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Run the full pipeline: read, transpile, optionally write
    pub fn compile(&self) -> Result<CompileOutput> {
        let source = self.read_source()?;
        let keywords = self.load_keywords()?;

        if self.options.verbose {
            tracing::info!(
                "Compiling: {} ({} keywords)",
                self.options.input.display(),
                keywords.len()
            );
        }

        let mut transpiler = Transpiler::with_keywords(keywords);
        let result = transpiler.transpile(&source);

        if self.options.verbose {
            if result.transpiled {
                tracing::info!(
                    "Generated {} bytes of JavaScript, {} diagnostic(s)",
                    result.code.len(),
                    result.diagnostics.len()
                );
            } else {
                tracing::info!("No {} marker, passing source through", crate::LANGUAGE_MARKER);
            }
        }

        if self.options.deny_errors && !result.diagnostics.is_empty() {
            return Err(TranspileError::Diagnostics(result.diagnostics));
        }

        if let Some(output) = &self.options.output {
            std::fs::write(output, &result.code)?;
            if self.options.verbose {
                tracing::info!("Wrote {}", output.display());
            }
        }

        Ok(CompileOutput {
            source_file: self.options.input.clone(),
            source,
            javascript: result.code,
            diagnostics: result.diagnostics,
            transpiled: result.transpiled,
        })
    }

    /// Read the source file, or stdin for `-`
    fn read_source(&self) -> Result<String> {
        if self.options.input.as_os_str() == STDIN_PATH {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            return Ok(source);
        }

        if !self.options.input.exists() {
            return Err(TranspileError::FileNotFound(self.options.input.clone()));
        }

        std::fs::read_to_string(&self.options.input).map_err(TranspileError::from)
    }

    /// Built-in keywords plus any from the configured keywords file
    fn load_keywords(&self) -> Result<KeywordSet> {
        let mut keywords = KeywordSet::builtin();
        if let Some(path) = &self.options.keywords_file {
            keywords.extend(read_keywords_file(path)?);
        }
        Ok(keywords)
    }
}

/// Parse a keywords file: one identifier per line, `#` starts a comment line
pub fn read_keywords_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(TranspileError::FileNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    let mut names = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !is_identifier(line) {
            return Err(TranspileError::Unsupported(format!(
                "invalid keyword `{}` on line {} of {}",
                line,
                idx + 1,
                path.display()
            )));
        }
        names.push(line.to_string());
    }
    Ok(names)
}
