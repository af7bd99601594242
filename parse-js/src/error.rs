use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the lexer and parser.
///
/// Diagnostic codes (prefix `PARSE`) are assigned per variant and are stable:
/// - `PARSE0001`: [`SyntaxErrorType::ExpectedNotFound`]
/// - `PARSE0002`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `PARSE0003`: [`SyntaxErrorType::InvalidAssigmentTarget`]
/// - `PARSE0004`: [`SyntaxErrorType::InvalidCharacterEscape`]
/// - `PARSE0005`: [`SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters`]
/// - `PARSE0006`: [`SyntaxErrorType::LineTerminatorAfterThrow`]
/// - `PARSE0007`: [`SyntaxErrorType::LineTerminatorInString`]
/// - `PARSE0008`: [`SyntaxErrorType::MalformedLiteralNumber`]
/// - `PARSE0009`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `PARSE0010`: [`SyntaxErrorType::UnexpectedEnd`]
/// - `PARSE0011`: [`SyntaxErrorType::UnsupportedSyntax`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedNotFound,
  ExpectedSyntax(&'static str),
  InvalidAssigmentTarget,
  InvalidCharacterEscape,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  LineTerminatorInString,
  MalformedLiteralNumber,
  RequiredTokenNotFound(TT),
  UnexpectedEnd,
  // Valid JavaScript that this parser deliberately does not model (e.g. regex or template literals).
  UnsupportedSyntax(&'static str),
}

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::ExpectedNotFound => "PARSE0001",
      SyntaxErrorType::ExpectedSyntax(_) => "PARSE0002",
      SyntaxErrorType::InvalidAssigmentTarget => "PARSE0003",
      SyntaxErrorType::InvalidCharacterEscape => "PARSE0004",
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => "PARSE0005",
      SyntaxErrorType::LineTerminatorAfterThrow => "PARSE0006",
      SyntaxErrorType::LineTerminatorInString => "PARSE0007",
      SyntaxErrorType::MalformedLiteralNumber => "PARSE0008",
      SyntaxErrorType::RequiredTokenNotFound(_) => "PARSE0009",
      SyntaxErrorType::UnexpectedEnd => "PARSE0010",
      SyntaxErrorType::UnsupportedSyntax(_) => "PARSE0011",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::ExpectedNotFound => "expected token not found".into(),
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidAssigmentTarget => "invalid assignment target".into(),
      SyntaxErrorType::InvalidCharacterEscape => "invalid character escape".into(),
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        "line terminator not allowed after arrow function parameters".into()
      }
      SyntaxErrorType::LineTerminatorAfterThrow => {
        "line terminator not allowed after `throw`".into()
      }
      SyntaxErrorType::LineTerminatorInString => {
        "line terminator not allowed in string literal".into()
      }
      SyntaxErrorType::MalformedLiteralNumber => "malformed number literal".into(),
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected token {:?}", token),
      SyntaxErrorType::UnexpectedEnd => actual_token
        .map(|tok| format!("unexpected end before {:?}", tok))
        .unwrap_or_else(|| "unexpected end of input".into()),
      SyntaxErrorType::UnsupportedSyntax(what) => format!("{} is not supported", what),
    }
  }
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [token={:?}]", self.message(), self.actual_token)
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
