//! Error types for document rendering

use std::fmt;

use thiserror::Error;

/// A single diagnostic reported by the Typst compiler
#[derive(Debug, Clone)]
pub struct CompileIssue {
    /// Human-readable message
    pub message: String,
    /// Line number in the main source (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Helpful hint for fixing the problem
    pub hint: Option<String>,
}

impl CompileIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
            hint: None,
        }
    }

    /// Set the location within the main source
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for CompileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}: {}", line, column, self.message)?,
            _ => write!(f, "{}", self.message)?,
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid input value: {0}")]
    InvalidInput(String),

    #[error("invalid asset path '{0}': {1}")]
    AssetPath(String, String),

    #[error("compilation failed: {}", summarize(.0))]
    Compile(Vec<CompileIssue>),

    #[error("PDF export failed: {0}")]
    Export(String),
}

fn summarize(issues: &[CompileIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_issue_display_with_location() {
        let issue = CompileIssue::new("unknown variable: foo")
            .with_location(3, 14)
            .with_hint("did you mean `for`?");

        assert_eq!(
            issue.to_string(),
            "3:14: unknown variable: foo (hint: did you mean `for`?)"
        );
    }

    #[test]
    fn test_issue_display_without_location() {
        let issue = CompileIssue::new("something broke");
        assert_eq!(issue.to_string(), "something broke");
    }

    #[test]
    fn test_compile_error_joins_issues() {
        let err = RenderError::Compile(vec![
            CompileIssue::new("first"),
            CompileIssue::new("second"),
        ]);
        assert_eq!(err.to_string(), "compilation failed: first; second");
    }
}
