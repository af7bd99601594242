use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use crate::ast::class_or_object::ObjMember;
use crate::ast::node::Node;

use super::Expr;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  Rest(Node<Expr>),
  Empty,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: f64,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}
