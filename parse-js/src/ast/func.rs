use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::expr::Expr;
use super::node::Node;
use super::stmt::decl::ParamDecl;
use super::stmt::Stmt;

#[derive(Debug, Drive, DriveMut, From, Serialize)]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // If arrow function.
  Expression(Node<Expr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  #[drive(skip)]
  pub generator: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub body: FuncBody,
}
