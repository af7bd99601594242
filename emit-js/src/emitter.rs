//! Boundary-aware text writer used by the statement and expression printers.
//!
//! Callers emit token-like fragments (keywords, identifiers, numbers,
//! punctuation) through the typed helpers, and the [`Emitter`] inserts the
//! minimal whitespace required to stop adjacent fragments from lexing as a
//! different token (e.g. `returnx`, `a+ +b`, `a- -b`).

use parse_js::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Controls how the emitter lays out statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitMode {
  /// Only inserts whitespace when necessary to avoid token ambiguity.
  Minified,
  /// Same tokens as minified, but every statement and class member starts on
  /// its own line, indented by two spaces per block level.
  Canonical,
}

#[derive(Clone, Copy, Debug)]
pub struct EmitOptions {
  pub mode: EmitMode,
}

impl EmitOptions {
  pub fn minified() -> Self {
    EmitOptions {
      mode: EmitMode::Minified,
    }
  }

  pub fn canonical() -> Self {
    EmitOptions {
      mode: EmitMode::Canonical,
    }
  }
}

impl Default for EmitOptions {
  fn default() -> Self {
    EmitOptions::minified()
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmitErrorKind {
  /// An identifier, binding or property name that cannot be written as source.
  InvalidIdentifier(String),
  Unsupported(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitError {
  pub kind: EmitErrorKind,
  pub loc: Option<Loc>,
}

impl EmitError {
  pub(crate) fn invalid_identifier(name: &str) -> Self {
    Self {
      kind: EmitErrorKind::InvalidIdentifier(name.to_string()),
      loc: None,
    }
  }

  pub(crate) fn unsupported(message: &'static str) -> Self {
    Self {
      kind: EmitErrorKind::Unsupported(message),
      loc: None,
    }
  }

  pub(crate) fn with_loc(mut self, loc: Loc) -> Self {
    if self.loc.is_none() {
      self.loc = Some(loc);
    }
    self
  }
}

impl Display for EmitError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      EmitErrorKind::InvalidIdentifier(name) => write!(f, "cannot emit identifier {name:?}")?,
      EmitErrorKind::Unsupported(message) => write!(f, "cannot emit {message}")?,
    };
    if let Some(loc) = self.loc {
      write!(f, " [{}:{}]", loc.0, loc.1)?;
    };
    Ok(())
  }
}

impl Error for EmitError {}

pub type EmitResult<T = ()> = Result<T, EmitError>;

/// Attaches `loc` to any error raised while emitting a node, keeping the innermost location.
pub(crate) fn with_node_context<T>(
  loc: Loc,
  f: impl FnOnce() -> EmitResult<T>,
) -> EmitResult<T> {
  f().map_err(|err| err.with_loc(loc))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Plus,
  Minus,
  Slash,
}

#[derive(Debug, Clone)]
pub struct Emitter {
  out: String,
  opts: EmitOptions,
  trailing: Boundary,
  depth: usize,
}

impl Emitter {
  pub fn new(opts: EmitOptions) -> Self {
    Emitter {
      out: String::new(),
      opts,
      trailing: Boundary::None,
      depth: 0,
    }
  }

  pub fn mode(&self) -> EmitMode {
    self.opts.mode
  }

  pub fn as_str(&self) -> &str {
    &self.out
  }

  pub fn into_string(self) -> String {
    self.out
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_word(keyword);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_word(identifier);
  }

  pub fn write_number(&mut self, number: &str) {
    self.write_word(number);
  }

  /// Emits punctuation or an operator.
  pub fn write_punct(&mut self, punct: &str) {
    let Some(first) = punct.bytes().next() else {
      return;
    };
    let clash = matches!(
      (self.trailing, first),
      (Boundary::Plus, b'+') | (Boundary::Minus, b'-') | (Boundary::Slash, b'/' | b'*')
    );
    if clash {
      self.out.push(' ');
    };
    self.out.push_str(punct);
    self.trailing = match punct.bytes().last() {
      Some(b'+') => Boundary::Plus,
      Some(b'-') => Boundary::Minus,
      Some(b'/') => Boundary::Slash,
      _ => Boundary::None,
    };
  }

  /// Emits a string literal with double quotes.
  pub fn write_string_literal(&mut self, value: &str) {
    crate::escape::escape_string_literal(&mut self.out, value);
    self.trailing = Boundary::None;
  }

  /// Starts a new line at the current indentation. Does nothing in minified mode.
  pub fn line_break(&mut self) {
    if self.opts.mode == EmitMode::Canonical {
      self.out.push('\n');
      for _ in 0..self.depth {
        self.out.push_str("  ");
      }
      self.trailing = Boundary::None;
    };
  }

  pub fn indent(&mut self) {
    self.depth += 1;
  }

  pub fn dedent(&mut self) {
    self.depth = self.depth.saturating_sub(1);
  }

  fn write_word(&mut self, text: &str) {
    if text.is_empty() {
      return;
    };
    if self.trailing == Boundary::Word {
      self.out.push(' ');
    };
    self.out.push_str(text);
    self.trailing = match text.bytes().last() {
      Some(c) if parse_js::char::is_id_continue(c) => Boundary::Word,
      _ => Boundary::None,
    };
  }
}

impl Default for Emitter {
  fn default() -> Self {
    Emitter::new(EmitOptions::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn separates_words() {
    let mut out = Emitter::default();
    out.write_keyword("return");
    out.write_identifier("x");
    out.write_punct(";");
    out.write_keyword("typeof");
    out.write_number("1");
    assert_eq!(out.as_str(), "return x;typeof 1");
  }

  #[test]
  fn separates_operators_that_would_merge() {
    let mut out = Emitter::default();
    out.write_identifier("a");
    out.write_punct("+");
    out.write_punct("+");
    out.write_identifier("b");
    out.write_punct("-");
    out.write_punct("--");
    out.write_identifier("c");
    assert_eq!(out.as_str(), "a+ +b- --c");
  }

  #[test]
  fn canonical_line_breaks_are_indented() {
    let mut out = Emitter::new(EmitOptions::canonical());
    out.write_punct("{");
    out.indent();
    out.line_break();
    out.write_identifier("a");
    out.dedent();
    out.line_break();
    out.write_punct("}");
    assert_eq!(out.as_str(), "{\n  a\n}");

    let mut out = Emitter::default();
    out.line_break();
    assert_eq!(out.as_str(), "");
  }
}
