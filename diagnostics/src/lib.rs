//! Shared diagnostics model and rendering utilities.
//!
//! Diagnostics are plain data: a stable code, a severity, a message and the
//! spans they point at. The transform collects them instead of failing fast,
//! and the CLI renders them with [`render::render_diagnostic`].
//!
//! ```
//! use diagnostics::files::SimpleFiles;
//! use diagnostics::render::render_diagnostic;
//! use diagnostics::{Diagnostic, Span, TextRange};
//!
//! let mut files = SimpleFiles::new();
//! let file = files.add("example.js", "let x = 1;");
//! let diag = Diagnostic::error("TEST0001", "an example error", Span::new(file, TextRange::new(4, 5)));
//!
//! let rendered = render_diagnostic(&files, &diag);
//! assert!(rendered.contains("TEST0001"));
//! assert!(rendered.contains("--> example.js:1:5"));
//! ```

pub mod files;
pub mod render;

use parse_js::error::SyntaxError;
use parse_js::loc::Loc;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// A stable identifier for a source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u32);

/// A byte range in a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

impl From<Loc> for TextRange {
  /// Saturates offsets that do not fit in `u32`.
  fn from(value: Loc) -> Self {
    Self {
      start: value.start_u32(),
      end: value.end_u32(),
    }
  }
}

/// A range within a specific file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Span {
  pub file: FileId,
  pub range: TextRange,
}

impl Span {
  pub const fn new(file: FileId, range: TextRange) -> Self {
    Self { file, range }
  }

  pub fn from_loc(file: FileId, loc: Loc) -> Self {
    Self::new(file, loc.into())
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
  Note,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A secondary location attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Label {
  pub span: Span,
  pub message: String,
  pub is_primary: bool,
}

impl Label {
  pub fn primary(span: Span, message: impl Into<String>) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary: true,
    }
  }

  pub fn secondary(span: Span, message: impl Into<String>) -> Self {
    Self {
      span,
      message: message.into(),
      is_primary: false,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Span,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Span,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Error, code, message, primary)
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Warning, code, message, primary)
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }
}

/// Converts a parse-js [`SyntaxError`] into a [`Diagnostic`] carrying its `PARSE` code.
pub fn diagnostic_from_syntax_error(file: FileId, err: &SyntaxError) -> Diagnostic {
  let mut diagnostic = Diagnostic::error(err.typ.code(), err.message(), Span::from_loc(file, err.loc));
  if u32::try_from(err.loc.1).is_err() {
    diagnostic = diagnostic.with_note(format!(
      "byte offsets truncated to fit u32 (start={}, end={})",
      err.loc.0, err.loc.1
    ));
  };
  diagnostic
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_js::error::SyntaxErrorType;

  #[test]
  fn converts_syntax_error() {
    let err = SyntaxError::new(SyntaxErrorType::UnexpectedEnd, Loc(2, 5), None);
    let diagnostic = diagnostic_from_syntax_error(FileId(1), &err);
    assert_eq!(diagnostic.code, "PARSE0010");
    assert_eq!(diagnostic.primary, Span::new(FileId(1), TextRange::new(2, 5)));
    assert!(diagnostic.is_error());
    assert!(diagnostic.notes.is_empty());
  }

  #[test]
  fn notes_truncated_offsets() {
    let err = SyntaxError::new(
      SyntaxErrorType::UnsupportedSyntax("regular expression literal"),
      Loc(usize::MAX - 1, usize::MAX),
      None,
    );
    let diagnostic = diagnostic_from_syntax_error(FileId(0), &err);
    assert_eq!(diagnostic.primary.range, TextRange::new(u32::MAX, u32::MAX));
    assert_eq!(diagnostic.message, "regular expression literal is not supported");
    assert!(diagnostic.notes[0].contains("truncated"));
  }

  #[test]
  fn severity_serializes_lowercase() {
    let diagnostic = Diagnostic::warning("DECO0004", "w", Span::new(FileId(0), TextRange::new(0, 1)));
    let json = serde_json::to_string(&diagnostic).unwrap();
    assert!(json.contains("\"severity\":\"warning\""));
    assert!(json.contains("\"code\":\"DECO0004\""));
  }
}
