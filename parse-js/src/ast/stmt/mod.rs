pub mod decl;

use decl::ClassDecl;
use decl::FuncDecl;
use decl::PatDecl;
use decl::VarDecl;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::expr::Expr;
use super::import_export::ExportNames;
use super::import_export::ImportNames;
use super::node::Node;

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Break(Node<BreakStmt>),
  Continue(Node<ContinueStmt>),
  Empty(Node<EmptyStmt>),
  ExportDefaultExpr(Node<ExportDefaultExprStmt>),
  ExportList(Node<ExportListStmt>),
  Expr(Node<ExprStmt>),
  For(Node<ForStmt>),
  If(Node<IfStmt>),
  Import(Node<ImportStmt>),
  Return(Node<ReturnStmt>),
  Throw(Node<ThrowStmt>),
  While(Node<WhileStmt>),

  ClassDecl(Node<ClassDecl>),
  FunctionDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BreakStmt {
  #[drive(skip)]
  pub label: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ContinueStmt {
  #[drive(skip)]
  pub label: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportDefaultExprStmt {
  pub expression: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportListStmt {
  pub names: ExportNames,
  #[drive(skip)]
  pub from: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ForInit {
  None,
  Expr(Node<Expr>),
  Decl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ForStmt {
  pub init: ForInit,
  pub condition: Option<Node<Expr>>,
  pub post: Option<Node<Expr>>,
  pub body: Node<Stmt>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportStmt {
  // PatDecl always contains IdPat.
  pub default: Option<Node<PatDecl>>,
  pub names: Option<ImportNames>,
  #[drive(skip)]
  pub module: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ThrowStmt {
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct WhileStmt {
  pub condition: Node<Expr>,
  pub body: Node<Stmt>,
}
