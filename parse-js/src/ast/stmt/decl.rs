use crate::ast::class_or_object::ClassMember;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Decorator;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDecl {
  pub decorators: Vec<Node<Decorator>>,
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  pub name: Option<Node<ClassOrFuncName>>, // Name can only be omitted in a default export, although a default export class can still have a name.
  pub extends: Option<Node<Expr>>,
  pub members: Vec<ClassMember>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub export_default: bool,
  pub name: Option<Node<ClassOrFuncName>>, // Name can only be omitted in a default export, although a default export function can still have a name.
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  // Only meaningful on method parameters.
  pub decorators: Vec<Node<Decorator>>,
  #[drive(skip)]
  pub rest: bool,
  pub pattern: Node<PatDecl>,
  pub default_value: Option<Node<Expr>>,
}

// Since a pattern can also be in an expression (e.g. assignment), have a specific unified type for declarations (e.g. imports, function params, var/let/const) only.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PatDecl {
  pub pat: Node<Pat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub export: bool,
  pub mode: VarDeclMode,
  pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<PatDecl>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Drive, DriveMut)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn as_str(self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }
}
