use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Comma,
  Conditional,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  NullishCoalescing,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentLogicalAnd
        | OperatorName::AssignmentLogicalOr
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentNullishCoalescing
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }
}

pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
  pub text: &'static str,
}

pub const PRECEDENCE_COMMA: u8 = 1;
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;
pub const PRECEDENCE_CONDITIONAL: u8 = 3;
pub const PRECEDENCE_UNARY: u8 = 15;
pub const PRECEDENCE_POSTFIX: u8 = 16;
pub const PRECEDENCE_CALL_MEMBER: u8 = 18;
pub const PRECEDENCE_PRIMARY: u8 = 19;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, precedence: u8, associativity: Associativity, text: &'static str| {
    map.insert(name, Operator { name, precedence, associativity, text });
  };
  add(Comma, PRECEDENCE_COMMA, Left, ",");
  add(Assignment, PRECEDENCE_ASSIGNMENT, Right, "=");
  add(AssignmentAddition, PRECEDENCE_ASSIGNMENT, Right, "+=");
  add(AssignmentBitwiseAnd, PRECEDENCE_ASSIGNMENT, Right, "&=");
  add(AssignmentBitwiseLeftShift, PRECEDENCE_ASSIGNMENT, Right, "<<=");
  add(AssignmentBitwiseOr, PRECEDENCE_ASSIGNMENT, Right, "|=");
  add(AssignmentBitwiseRightShift, PRECEDENCE_ASSIGNMENT, Right, ">>=");
  add(AssignmentBitwiseUnsignedRightShift, PRECEDENCE_ASSIGNMENT, Right, ">>>=");
  add(AssignmentBitwiseXor, PRECEDENCE_ASSIGNMENT, Right, "^=");
  add(AssignmentDivision, PRECEDENCE_ASSIGNMENT, Right, "/=");
  add(AssignmentExponentiation, PRECEDENCE_ASSIGNMENT, Right, "**=");
  add(AssignmentLogicalAnd, PRECEDENCE_ASSIGNMENT, Right, "&&=");
  add(AssignmentLogicalOr, PRECEDENCE_ASSIGNMENT, Right, "||=");
  add(AssignmentMultiplication, PRECEDENCE_ASSIGNMENT, Right, "*=");
  add(AssignmentNullishCoalescing, PRECEDENCE_ASSIGNMENT, Right, "??=");
  add(AssignmentRemainder, PRECEDENCE_ASSIGNMENT, Right, "%=");
  add(AssignmentSubtraction, PRECEDENCE_ASSIGNMENT, Right, "-=");
  add(Conditional, PRECEDENCE_CONDITIONAL, Right, "?");
  add(NullishCoalescing, 4, Left, "??");
  add(LogicalOr, 4, Left, "||");
  add(LogicalAnd, 5, Left, "&&");
  add(BitwiseOr, 6, Left, "|");
  add(BitwiseXor, 7, Left, "^");
  add(BitwiseAnd, 8, Left, "&");
  add(Equality, 9, Left, "==");
  add(Inequality, 9, Left, "!=");
  add(StrictEquality, 9, Left, "===");
  add(StrictInequality, 9, Left, "!==");
  add(GreaterThan, 10, Left, ">");
  add(GreaterThanOrEqual, 10, Left, ">=");
  add(In, 10, Left, "in");
  add(Instanceof, 10, Left, "instanceof");
  add(LessThan, 10, Left, "<");
  add(LessThanOrEqual, 10, Left, "<=");
  add(BitwiseLeftShift, 11, Left, "<<");
  add(BitwiseRightShift, 11, Left, ">>");
  add(BitwiseUnsignedRightShift, 11, Left, ">>>");
  add(Addition, 12, Left, "+");
  add(Subtraction, 12, Left, "-");
  add(Division, 13, Left, "/");
  add(Multiplication, 13, Left, "*");
  add(Remainder, 13, Left, "%");
  add(Exponentiation, 14, Right, "**");
  add(Await, PRECEDENCE_UNARY, Right, "await");
  add(BitwiseNot, PRECEDENCE_UNARY, Right, "~");
  add(Delete, PRECEDENCE_UNARY, Right, "delete");
  add(LogicalNot, PRECEDENCE_UNARY, Right, "!");
  add(PrefixDecrement, PRECEDENCE_UNARY, Right, "--");
  add(PrefixIncrement, PRECEDENCE_UNARY, Right, "++");
  add(Typeof, PRECEDENCE_UNARY, Right, "typeof");
  add(UnaryNegation, PRECEDENCE_UNARY, Right, "-");
  add(UnaryPlus, PRECEDENCE_UNARY, Right, "+");
  add(Void, PRECEDENCE_UNARY, Right, "void");
  add(PostfixDecrement, PRECEDENCE_POSTFIX, Left, "--");
  add(PostfixIncrement, PRECEDENCE_POSTFIX, Left, "++");
  map
});
