use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::node::Node;

use super::Expr;

#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPat {
  // Unnamed elements can exist.
  pub elements: Vec<Option<ArrPatElem>>,
  pub rest: Option<Node<Pat>>,
}

// Not really a pattern but functions similarly so kept here in pat.rs.
// This exists as a separate AST node type for easy replacement when renaming.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrFuncName {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

// For an object pattern, `...` must be followed by an identifier.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPatProp {
  pub key: ClassOrObjKey,
  // If `shorthand`, `key` is Direct and `target` is an IdPat of the same name.
  pub target: Node<Pat>,
  #[drive(skip)]
  pub shorthand: bool,
  pub default_value: Option<Node<Expr>>,
}
