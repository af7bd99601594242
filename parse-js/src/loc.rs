use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the current source file expressed as UTF-8 byte offsets.
///
/// Synthesized nodes usually borrow the location of the node they were derived
/// from, so a `Loc` is not guaranteed to match `source[loc.0..loc.1]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }

  /// Returns the starting offset as `u32`, clamping to `u32::MAX` if necessary.
  pub fn start_u32(&self) -> u32 {
    u32::try_from(self.0).unwrap_or(u32::MAX)
  }

  /// Returns the ending offset as `u32`, clamping to `u32::MAX` if necessary.
  pub fn end_u32(&self) -> u32 {
    u32::try_from(self.1).unwrap_or(u32::MAX)
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}
