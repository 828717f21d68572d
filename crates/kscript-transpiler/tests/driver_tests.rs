//! Integration tests for file-based compilation

use std::fs;

use kscript_transpiler::{CompileOptions, Compiler, TranspileError};

#[test]
fn test_compile_file_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sketch.ks");
    let output = dir.path().join("sketch.js");
    fs::write(&input, "#kscript\nsetup:\n  background 0 0 0\nend setup\n").unwrap();

    let result = Compiler::new(CompileOptions::new(&input).output(&output))
        .compile()
        .expect("compilation failed");

    assert!(result.transpiled);
    assert_eq!(result.javascript, "function setup() {\nbackground(0, 0, 0);\n}");
    assert_eq!(fs::read_to_string(&output).unwrap(), result.javascript);
}

#[test]
fn test_plain_javascript_file_is_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("native.js");
    let source = "function draw(t) {\n  circle(10, 10, 5);\n}\n";
    fs::write(&input, source).unwrap();

    let result = Compiler::new(CompileOptions::new(&input)).compile().unwrap();
    assert!(!result.transpiled);
    assert_eq!(result.javascript, source);
}

#[test]
fn test_keywords_file_extends_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sketch.ks");
    let keywords = dir.path().join("keywords.txt");
    fs::write(&input, "#kscript\nmode = sparkle\nshape = circle").unwrap();
    fs::write(&keywords, "# effects exposed by the renderer\nsparkle\n\nbloom\n").unwrap();

    let result = Compiler::new(CompileOptions::new(&input).keywords_file(&keywords))
        .compile()
        .unwrap();

    assert_eq!(result.javascript, "var mode = sparkle;\nvar shape = circle;");
}

#[test]
fn test_invalid_keyword_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sketch.ks");
    let keywords = dir.path().join("keywords.txt");
    fs::write(&input, "#kscript\nx = 1").unwrap();
    fs::write(&keywords, "sparkle\nnot a name\n").unwrap();

    let err = Compiler::new(CompileOptions::new(&input).keywords_file(&keywords))
        .compile()
        .unwrap_err();

    match err {
        TranspileError::Unsupported(msg) => assert!(msg.contains("line 2")),
        other => panic!("expected Unsupported, got {:?}", other),
    }
}

#[test]
fn test_diagnostics_are_returned() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sketch.ks");
    fs::write(&input, "#kscript\nlog \"broken\nx = 1").unwrap();

    let result = Compiler::new(CompileOptions::new(&input)).compile().unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert!(result.javascript.ends_with("var x = 1;"));
}

#[test]
fn test_deny_errors_fails_compilation() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sketch.ks");
    let output = dir.path().join("sketch.js");
    fs::write(&input, "#kscript\nlog \"broken\nx = 1").unwrap();

    let err = Compiler::new(CompileOptions::new(&input).output(&output).deny_errors(true))
        .compile()
        .unwrap_err();

    assert!(matches!(err, TranspileError::Diagnostics(ref d) if d.len() == 1));
    assert!(!output.exists());
}
