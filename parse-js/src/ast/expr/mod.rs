pub mod lit;
pub mod pat;

use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use lit::LitArrExpr;
use lit::LitBoolExpr;
use lit::LitNullExpr;
use lit::LitNumExpr;
use lit::LitObjExpr;
use lit::LitStrExpr;
use pat::ClassOrFuncName;
use serde::Serialize;

use crate::operator::OperatorName;

use super::class_or_object::ClassMember;
use super::func::Func;
use super::node::Node;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  Super(Node<SuperExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitStr(Node<LitStrExpr>),
}

/// `@expr` attached to a class, class member or method parameter. The expression is opaque to everything but the emitter.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Decorator {
  pub expression: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>, // Always arrow.
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassExpr {
  pub decorators: Vec<Node<Decorator>>,
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<ClassMember>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  // Includes the leading `#` for private names.
  #[drive(skip)]
  pub right: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryPostfixExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}
