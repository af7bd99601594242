use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Span;
use emit_js::EmitError;
use parse_js::error::SyntaxError;
use parse_js::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

pub const COMPUTED_KEY: &str = "DECO0001";
pub const PRIVATE_KEY: &str = "DECO0002";
pub const MISSING_CLASS_NAME: &str = "DECO0003";
pub const STAGE3_PARAMETER_DECORATOR: &str = "DECO0004";
pub const CLASS_EXPRESSION_DECORATOR: &str = "DECO0005";
pub const STAGE3_STATIC_FIELD: &str = "DECO0006";
pub const MISSING_SUPER_CALL: &str = "DECO0007";

pub(crate) fn computed_key(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    COMPUTED_KEY,
    "decorators on members with computed keys are not supported",
    Span::from_loc(file, loc),
  )
}

pub(crate) fn private_key(file: FileId, loc: Loc, name: &str) -> Diagnostic {
  Diagnostic::error(
    PRIVATE_KEY,
    format!("decorators on private member `{name}` are not supported"),
    Span::from_loc(file, loc),
  )
}

pub(crate) fn missing_class_name(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    MISSING_CLASS_NAME,
    "decorated class declaration has no name",
    Span::from_loc(file, loc),
  )
}

pub(crate) fn stage3_parameter_decorator(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    STAGE3_PARAMETER_DECORATOR,
    "parameter decorators require experimentalDecorators",
    Span::from_loc(file, loc),
  )
  .with_note("Stage-3 decorators cannot be applied to parameters")
}

pub(crate) fn class_expression_decorator(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    CLASS_EXPRESSION_DECORATOR,
    "decorators on class expressions are not supported",
    Span::from_loc(file, loc),
  )
  .with_note("declare the class with a name and decorate the declaration instead")
}

pub(crate) fn stage3_static_field(file: FileId, loc: Loc, name: &str) -> Diagnostic {
  Diagnostic::error(
    STAGE3_STATIC_FIELD,
    format!("decorators on static field `{name}` are not supported"),
    Span::from_loc(file, loc),
  )
}

pub(crate) fn missing_super_call(file: FileId, loc: Loc) -> Diagnostic {
  Diagnostic::error(
    MISSING_SUPER_CALL,
    "cannot place field initializers: derived constructor has no top-level `super(...)` call",
    Span::from_loc(file, loc),
  )
  .with_note("call `super(...)` as a statement directly in the constructor body")
}

/// Errors from [`crate::transform_source`], which parses, transforms and prints in one go.
#[derive(Debug)]
pub enum DecorateError {
  Syntax(SyntaxError),
  Transform(Vec<Diagnostic>),
  Emit(EmitError),
}

impl Display for DecorateError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      DecorateError::Syntax(err) => write!(f, "syntax error: {err}"),
      DecorateError::Transform(diagnostics) => {
        write!(f, "transform failed with {} diagnostic(s)", diagnostics.len())?;
        for d in diagnostics {
          write!(f, "\n{}[{}]: {}", d.severity, d.code, d.message)?;
        }
        Ok(())
      }
      DecorateError::Emit(err) => write!(f, "emit error: {err}"),
    }
  }
}

impl Error for DecorateError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DecorateError::Syntax(err) => Some(err),
      DecorateError::Transform(_) => None,
      DecorateError::Emit(err) => Some(err),
    }
  }
}

impl From<SyntaxError> for DecorateError {
  fn from(value: SyntaxError) -> Self {
    DecorateError::Syntax(value)
  }
}

impl From<EmitError> for DecorateError {
  fn from(value: EmitError) -> Self {
    DecorateError::Emit(value)
  }
}
