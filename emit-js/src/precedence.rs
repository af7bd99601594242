use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::operator::Associativity;
use parse_js::operator::OperatorName;
use parse_js::operator::OPERATORS;
use parse_js::operator::PRECEDENCE_ASSIGNMENT;
use parse_js::operator::PRECEDENCE_CALL_MEMBER;
use parse_js::operator::PRECEDENCE_CONDITIONAL;
use parse_js::operator::PRECEDENCE_PRIMARY;

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }
}

pub const COMMA_PRECEDENCE: Prec = Prec::new(parse_js::operator::PRECEDENCE_COMMA);
pub const ASSIGNMENT_PRECEDENCE: Prec = Prec::new(PRECEDENCE_ASSIGNMENT);
pub const CONDITIONAL_PRECEDENCE: Prec = Prec::new(PRECEDENCE_CONDITIONAL);
pub const UNARY_PRECEDENCE: Prec = Prec::new(parse_js::operator::PRECEDENCE_UNARY);
pub const POSTFIX_PRECEDENCE: Prec = Prec::new(parse_js::operator::PRECEDENCE_POSTFIX);
/// Optional chaining, member access, calls and `new` with arguments.
pub const CALL_MEMBER_PRECEDENCE: Prec = Prec::new(PRECEDENCE_CALL_MEMBER);
pub const PRIMARY_PRECEDENCE: Prec = Prec::new(PRECEDENCE_PRIMARY);
/// Arrow functions are assignment expressions, so they need parentheses as operands.
pub const ARROW_FUNCTION_PRECEDENCE: Prec = ASSIGNMENT_PRECEDENCE;

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

pub fn needs_parens(child_prec: Prec, min_prec: Prec) -> bool {
  child_prec < min_prec
}

pub fn operator_prec(op: OperatorName) -> Prec {
  // Every operator name the parser produces is in the table.
  OPERATORS.get(&op).map_or(PRIMARY_PRECEDENCE, |o| Prec::new(o.precedence))
}

pub fn child_min_prec_for_binary(op: OperatorName, side: Side) -> Prec {
  let prec = operator_prec(op);
  let associativity = OPERATORS
    .get(&op)
    .map_or(Associativity::Left, |o| o.associativity);
  match (associativity, side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec.tighter(),
  }
}

pub fn expr_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => operator_prec(binary.stx.operator),
    Expr::Cond(_) => CONDITIONAL_PRECEDENCE,
    Expr::Unary(unary) => operator_prec(unary.stx.operator),
    Expr::UnaryPostfix(unary) => operator_prec(unary.stx.operator),
    Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) | Expr::New(_) => {
      CALL_MEMBER_PRECEDENCE
    }
    Expr::ArrowFunc(_) => ARROW_FUNCTION_PRECEDENCE,
    Expr::Class(_)
    | Expr::Func(_)
    | Expr::Id(_)
    | Expr::Super(_)
    | Expr::This(_)
    | Expr::LitArr(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitObj(_)
    | Expr::LitStr(_) => PRIMARY_PRECEDENCE,
  }
}

/// Whether `??` would be mixed with `||` or `&&` without parentheses, which is a syntax error.
pub fn mixes_nullish_with_logical(parent: OperatorName, child: &Node<Expr>) -> bool {
  let Expr::Binary(child) = child.stx.as_ref() else {
    return false;
  };
  let is_logical = |op| matches!(op, OperatorName::LogicalAnd | OperatorName::LogicalOr);
  (parent == OperatorName::NullishCoalescing && is_logical(child.stx.operator))
    || (is_logical(parent) && child.stx.operator == OperatorName::NullishCoalescing)
}

/// The expression that would be printed first, ignoring any parentheses the printer adds.
pub fn leftmost(expr: &Node<Expr>) -> &Node<Expr> {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => leftmost(&binary.stx.left),
    Expr::Cond(cond) => leftmost(&cond.stx.test),
    Expr::Call(call) => leftmost(&call.stx.callee),
    Expr::Member(member) => leftmost(&member.stx.left),
    Expr::ComputedMember(member) => leftmost(&member.stx.object),
    Expr::UnaryPostfix(unary) => leftmost(&unary.stx.argument),
    _ => expr,
  }
}

/// Whether the callee of `new` would capture a call or optional chain if printed without parentheses.
pub fn new_callee_needs_parens(callee: &Node<Expr>) -> bool {
  match callee.stx.as_ref() {
    Expr::Call(_) => true,
    Expr::Member(member) => member.stx.optional_chaining || new_callee_needs_parens(&member.stx.left),
    Expr::ComputedMember(member) => {
      member.stx.optional_chaining || new_callee_needs_parens(&member.stx.object)
    }
    _ => false,
  }
}
