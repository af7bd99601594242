use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use crate::token::TT;

use super::expr::pat::IdPat;
use super::expr::Decorator;
use super::expr::Expr;
use super::func::Func;
use super::node::Node;
use super::stmt::Stmt;

/// This is a node as the key may not the same as source[node.loc], due to decoding/normalization.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  #[drive(skip)]
  pub key: String,
  // The original token type is stored here to tell identifiers, keywords, strings, numbers and private names apart.
  #[drive(skip)]
  pub tt: TT,
}

impl ClassOrObjMemberDirectKey {
  pub fn is_private(&self) -> bool {
    self.tt == TT::PrivateMember
  }
}

// WARNING: This enum must exist, and the two variants cannot be merged by representing Direct with an IdExpr, as it's not a usage of a variable.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ClassOrObjKey {
  // Identifier, keyword, string, number, or private name.
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

impl ClassOrObjKey {
  /// The key's name, if it is not computed.
  pub fn direct_name(&self) -> Option<&str> {
    match self {
      ClassOrObjKey::Direct(d) => Some(&d.stx.key),
      ClassOrObjKey::Computed(_) => None,
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Drive, DriveMut, Serialize)]
pub enum AccessorKind {
  Getter,
  Setter,
}

/// A data property, optionally an auto-accessor (`accessor x = 1`).
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassField {
  pub decorators: Vec<Node<Decorator>>,
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  #[drive(skip)]
  pub accessor: bool,
  pub value: Option<Node<Expr>>,
}

/// A getter or setter. `func.parameters` is empty for getters and has exactly one element for setters.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassAccessor {
  pub decorators: Vec<Node<Decorator>>,
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  #[drive(skip)]
  pub kind: AccessorKind,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassMethod {
  pub decorators: Vec<Node<Decorator>>,
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  pub func: Node<Func>,
}

impl ClassMethod {
  pub fn is_constructor(&self) -> bool {
    !self.static_
      && matches!(&self.key, ClassOrObjKey::Direct(d) if d.stx.key == "constructor" && !d.stx.is_private())
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassStaticBlock {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum ClassMember {
  Field(Node<ClassField>),
  Accessor(Node<ClassAccessor>),
  Method(Node<ClassMethod>),
  StaticBlock(Node<ClassStaticBlock>),
}

impl ClassMember {
  pub fn decorators(&self) -> &[Node<Decorator>] {
    match self {
      ClassMember::Field(m) => &m.stx.decorators,
      ClassMember::Accessor(m) => &m.stx.decorators,
      ClassMember::Method(m) => &m.stx.decorators,
      ClassMember::StaticBlock(_) => &[],
    }
  }

  pub fn key(&self) -> Option<&ClassOrObjKey> {
    match self {
      ClassMember::Field(m) => Some(&m.stx.key),
      ClassMember::Accessor(m) => Some(&m.stx.key),
      ClassMember::Method(m) => Some(&m.stx.key),
      ClassMember::StaticBlock(_) => None,
    }
  }

  pub fn is_static(&self) -> bool {
    match self {
      ClassMember::Field(m) => m.stx.static_,
      ClassMember::Accessor(m) => m.stx.static_,
      ClassMember::Method(m) => m.stx.static_,
      ClassMember::StaticBlock(_) => true,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: Node<Expr>,
  },
  Method {
    key: ClassOrObjKey,
    accessor: Option<AccessorKind>,
    func: Node<Func>,
  },
  Shorthand {
    id: Node<IdPat>,
  },
  Rest {
    val: Node<Expr>,
  },
}

// This is a node instead of an enum so that it can carry its own location.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}
