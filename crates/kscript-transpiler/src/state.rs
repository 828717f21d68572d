//! Per-invocation bookkeeping for a single `parse` call.

use std::collections::HashSet;

/// State tracked while transforming one source buffer.
///
/// Block tracking is a single flag rather than a stack: KScript only has one
/// level of `name:` ... `end` blocks, and a second open before a close just
/// leaves the flag set.
#[derive(Debug, Default, Clone)]
pub struct ParseState {
    /// Identifiers already introduced as bindings
    pub declared_names: HashSet<String>,
    pub inside_block: bool,
    /// 1-based index of the line being transformed
    pub current_line: usize,
    /// Set by the `#debug` directive; only affects trace logging
    pub debug_enabled: bool,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.declared_names.clear();
        self.inside_block = false;
        self.current_line = 0;
        self.debug_enabled = false;
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared_names.contains(name)
    }

    /// Record a binding. Returns `true` if the name was not declared before.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.declared_names.contains(name) {
            return false;
        }
        self.declared_names.insert(name.to_string())
    }

    pub fn enter_block(&mut self) {
        self.inside_block = true;
    }

    pub fn exit_block(&mut self) {
        self.inside_block = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_once() {
        let mut state = ParseState::new();
        assert!(state.declare("x"));
        assert!(!state.declare("x"));
        assert!(state.is_declared("x"));
    }

    #[test]
    fn test_block_flag_does_not_stack() {
        let mut state = ParseState::new();
        state.enter_block();
        state.enter_block();
        state.exit_block();
        assert!(!state.inside_block);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = ParseState::new();
        state.declare("x");
        state.enter_block();
        state.current_line = 12;
        state.debug_enabled = true;
        state.reset();
        assert!(state.declared_names.is_empty());
        assert!(!state.inside_block);
        assert_eq!(state.current_line, 0);
        assert!(!state.debug_enabled);
    }
}
