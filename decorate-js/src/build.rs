//! Constructors for the syntax the lowerers synthesize.
//!
//! Synthesized nodes have no source text of their own, so each takes the location of the node it was derived from.

use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::class_or_object::ClassMethod;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::class_or_object::ClassOrObjMemberDirectKey;
use parse_js::ast::class_or_object::ClassStaticBlock;
use parse_js::ast::class_or_object::ObjMember;
use parse_js::ast::class_or_object::ObjMemberType;
use parse_js::ast::expr::lit::LitArrElem;
use parse_js::ast::expr::lit::LitArrExpr;
use parse_js::ast::expr::lit::LitBoolExpr;
use parse_js::ast::expr::lit::LitNullExpr;
use parse_js::ast::expr::lit::LitNumExpr;
use parse_js::ast::expr::lit::LitObjExpr;
use parse_js::ast::expr::lit::LitStrExpr;
use parse_js::ast::expr::pat::ClassOrFuncName;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::expr::ArrowFuncExpr;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CallArg;
use parse_js::ast::expr::CallExpr;
use parse_js::ast::expr::ClassExpr;
use parse_js::ast::expr::ComputedMemberExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::expr::MemberExpr;
use parse_js::ast::expr::SuperExpr;
use parse_js::ast::expr::ThisExpr;
use parse_js::ast::expr::UnaryExpr;
use parse_js::ast::func::Func;
use parse_js::ast::func::FuncBody;
use parse_js::ast::import_export::ExportName;
use parse_js::ast::import_export::ExportNames;
use parse_js::ast::import_export::ImportName;
use parse_js::ast::import_export::ImportNames;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ParamDecl;
use parse_js::ast::stmt::decl::PatDecl;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::decl::VarDeclMode;
use parse_js::ast::stmt::decl::VarDeclarator;
use parse_js::ast::stmt::ExportDefaultExprStmt;
use parse_js::ast::stmt::ExportListStmt;
use parse_js::ast::stmt::ExprStmt;
use parse_js::ast::stmt::ImportStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;
use parse_js::token::TT;

/// How a property is accessed on an object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyKey {
  /// `obj.name`
  Name(String),
  /// `obj["name"]`, for string and numeric literal keys.
  Literal(String),
}

impl PropertyKey {
  pub fn as_str(&self) -> &str {
    match self {
      PropertyKey::Name(name) | PropertyKey::Literal(name) => name,
    }
  }
}

pub fn id(loc: Loc, name: impl Into<String>) -> Node<Expr> {
  Node::new(loc, IdExpr { name: name.into() }).into_wrapped()
}

pub fn string(loc: Loc, value: impl Into<String>) -> Node<Expr> {
  Node::new(
    loc,
    LitStrExpr {
      value: value.into(),
    },
  )
  .into_wrapped()
}

pub fn number(loc: Loc, value: f64) -> Node<Expr> {
  Node::new(loc, LitNumExpr { value }).into_wrapped()
}

pub fn boolean(loc: Loc, value: bool) -> Node<Expr> {
  Node::new(loc, LitBoolExpr { value }).into_wrapped()
}

pub fn null(loc: Loc) -> Node<Expr> {
  Node::new(loc, LitNullExpr {}).into_wrapped()
}

pub fn this(loc: Loc) -> Node<Expr> {
  Node::new(loc, ThisExpr {}).into_wrapped()
}

/// `void 0`
pub fn void_zero(loc: Loc) -> Node<Expr> {
  unary(loc, OperatorName::Void, number(loc, 0.0))
}

pub fn unary(loc: Loc, operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
  Node::new(loc, UnaryExpr { operator, argument }).into_wrapped()
}

pub fn binary(loc: Loc, operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    BinaryExpr {
      operator,
      left,
      right,
    },
  )
  .into_wrapped()
}

pub fn assign(loc: Loc, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  binary(loc, OperatorName::Assignment, left, right)
}

pub fn call(loc: Loc, callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  let arguments = arguments
    .into_iter()
    .map(|value| {
      Node::new(
        value.loc,
        CallArg {
          spread: false,
          value,
        },
      )
    })
    .collect();
  Node::new(
    loc,
    CallExpr {
      optional_chaining: false,
      callee,
      arguments,
    },
  )
  .into_wrapped()
}

/// Calls a function bound to `name`.
pub fn call_id(loc: Loc, name: &str, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  call(loc, id(loc, name), arguments)
}

pub fn member(loc: Loc, left: Node<Expr>, right: impl Into<String>) -> Node<Expr> {
  Node::new(
    loc,
    MemberExpr {
      optional_chaining: false,
      left,
      right: right.into(),
    },
  )
  .into_wrapped()
}

pub fn computed_member(loc: Loc, object: Node<Expr>, member: Node<Expr>) -> Node<Expr> {
  Node::new(
    loc,
    ComputedMemberExpr {
      optional_chaining: false,
      object,
      member,
    },
  )
  .into_wrapped()
}

pub fn property(loc: Loc, object: Node<Expr>, key: &PropertyKey) -> Node<Expr> {
  match key {
    PropertyKey::Name(name) => member(loc, object, name.clone()),
    PropertyKey::Literal(value) => computed_member(loc, object, string(loc, value.clone())),
  }
}

/// `Symbol.metadata`
pub fn symbol_metadata(loc: Loc) -> Node<Expr> {
  member(loc, id(loc, "Symbol"), "metadata")
}

pub fn array(loc: Loc, elements: Vec<Node<Expr>>) -> Node<Expr> {
  Node::new(
    loc,
    LitArrExpr {
      elements: elements.into_iter().map(LitArrElem::Single).collect(),
    },
  )
  .into_wrapped()
}

fn direct_key(loc: Loc, key: &str) -> ClassOrObjKey {
  ClassOrObjKey::Direct(Node::new(
    loc,
    ClassOrObjMemberDirectKey {
      key: key.to_string(),
      tt: TT::Identifier,
    },
  ))
}

/// An object literal with plain `key: value` properties.
pub fn object(loc: Loc, properties: Vec<(&str, Node<Expr>)>) -> Node<Expr> {
  let members = properties
    .into_iter()
    .map(|(key, val)| {
      Node::new(
        val.loc,
        ObjMember {
          typ: ObjMemberType::Valued {
            key: direct_key(loc, key),
            val,
          },
        },
      )
    })
    .collect();
  Node::new(loc, LitObjExpr { members }).into_wrapped()
}

/// `{enumerable: true, configurable: true, writable: true, value}`
pub fn data_descriptor(loc: Loc, value: Node<Expr>) -> Node<Expr> {
  object(loc, vec![
    ("enumerable", boolean(loc, true)),
    ("configurable", boolean(loc, true)),
    ("writable", boolean(loc, true)),
    ("value", value),
  ])
}

pub fn param(loc: Loc, name: &str, rest: bool) -> Node<ParamDecl> {
  Node::new(
    loc,
    ParamDecl {
      decorators: Vec::new(),
      rest,
      pattern: pat_decl(loc, name),
      default_value: None,
    },
  )
}

fn pat_decl(loc: Loc, name: &str) -> Node<PatDecl> {
  let pat = Node::new(
    loc,
    IdPat {
      name: name.to_string(),
    },
  )
  .into_wrapped::<Pat>();
  Node::new(loc, PatDecl { pat })
}

fn func(loc: Loc, arrow: bool, parameters: Vec<Node<ParamDecl>>, body: FuncBody) -> Node<Func> {
  Node::new(
    loc,
    Func {
      arrow,
      async_: false,
      generator: false,
      parameters,
      body,
    },
  )
}

/// `(params) => expr`
pub fn arrow(loc: Loc, params: &[&str], body: Node<Expr>) -> Node<Expr> {
  arrow_with_body(loc, params, FuncBody::Expression(body))
}

/// `(params) => { stmts }`
pub fn arrow_block(loc: Loc, params: &[&str], body: Vec<Node<Stmt>>) -> Node<Expr> {
  arrow_with_body(loc, params, FuncBody::Block(body))
}

fn arrow_with_body(loc: Loc, params: &[&str], body: FuncBody) -> Node<Expr> {
  let parameters = params.iter().map(|p| param(loc, p, false)).collect();
  Node::new(
    loc,
    ArrowFuncExpr {
      func: func(loc, true, parameters, body),
    },
  )
  .into_wrapped()
}

pub fn expr_stmt(loc: Loc, expr: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ExprStmt { expr }).into_wrapped()
}

pub fn var_decl(loc: Loc, mode: VarDeclMode, declarators: Vec<(String, Option<Node<Expr>>)>) -> Node<Stmt> {
  let declarators = declarators
    .into_iter()
    .map(|(name, initializer)| VarDeclarator {
      pattern: pat_decl(loc, &name),
      initializer,
    })
    .collect();
  Node::new(
    loc,
    VarDecl {
      export: false,
      mode,
      declarators,
    },
  )
  .into_wrapped()
}

pub fn let_decl(loc: Loc, name: &str, initializer: Node<Expr>) -> Node<Stmt> {
  var_decl(loc, VarDeclMode::Let, vec![(name.to_string(), Some(initializer))])
}

/// `export { name };`
pub fn export_named(loc: Loc, name: &str) -> Node<Stmt> {
  let alias = Node::new(
    loc,
    IdPat {
      name: name.to_string(),
    },
  );
  let export = Node::new(
    loc,
    ExportName {
      exportable: name.to_string(),
      alias,
    },
  );
  Node::new(
    loc,
    ExportListStmt {
      names: ExportNames::Specific(vec![export]),
      from: None,
    },
  )
  .into_wrapped()
}

/// `export default name;`
pub fn export_default(loc: Loc, name: &str) -> Node<Stmt> {
  Node::new(
    loc,
    ExportDefaultExprStmt {
      expression: id(loc, name),
    },
  )
  .into_wrapped()
}

/// `import { imported as local, ... } from "module";`
pub fn import_named(loc: Loc, module: &str, specifiers: Vec<(&str, String)>) -> Node<Stmt> {
  let names = specifiers
    .into_iter()
    .map(|(importable, local)| {
      Node::new(
        loc,
        ImportName {
          importable: importable.to_string(),
          alias: pat_decl(loc, &local),
        },
      )
    })
    .collect();
  Node::new(
    loc,
    ImportStmt {
      default: None,
      names: Some(ImportNames::Specific(names)),
      module: module.to_string(),
    },
  )
  .into_wrapped()
}

pub fn class_expr(
  loc: Loc,
  name: Option<Node<ClassOrFuncName>>,
  extends: Option<Node<Expr>>,
  members: Vec<ClassMember>,
) -> Node<Expr> {
  Node::new(
    loc,
    ClassExpr {
      decorators: Vec::new(),
      name,
      extends,
      members,
    },
  )
  .into_wrapped()
}

pub fn static_block(loc: Loc, body: Vec<Node<Stmt>>) -> ClassMember {
  Node::new(loc, ClassStaticBlock { body }).into()
}

/// `constructor(){}`, or `constructor(...args){super(...args);}` for a derived class.
pub fn constructor(loc: Loc, derived: bool) -> ClassMember {
  let (parameters, body) = if derived {
    let super_call = Node::new(
      loc,
      CallExpr {
        optional_chaining: false,
        callee: Node::new(loc, SuperExpr {}).into_wrapped(),
        arguments: vec![Node::new(loc, CallArg {
          spread: true,
          value: id(loc, "args"),
        })],
      },
    )
    .into_wrapped();
    (vec![param(loc, "args", true)], vec![expr_stmt(loc, super_call)])
  } else {
    (Vec::new(), Vec::new())
  };
  Node::new(
    loc,
    ClassMethod {
      decorators: Vec::new(),
      key: direct_key(loc, "constructor"),
      static_: false,
      func: func(loc, false, parameters, FuncBody::Block(body)),
    },
  )
  .into()
}

#[cfg(test)]
mod tests {
  use super::*;
  use emit_js::emit_expr;
  use emit_js::emit_stmt;
  use emit_js::EmitOptions;

  fn expr(e: Node<Expr>) -> String {
    emit_expr(&e, EmitOptions::minified()).unwrap()
  }

  #[test]
  fn builds_access_functions() {
    let loc = Loc(0, 0);
    let has = arrow(loc, &["obj"], binary(loc, OperatorName::In, string(loc, "x"), id(loc, "obj")));
    assert_eq!(expr(has), r#"obj=>"x"in obj"#);
    let set = arrow_block(loc, &["obj", "value"], vec![expr_stmt(
      loc,
      assign(
        loc,
        property(loc, id(loc, "obj"), &PropertyKey::Literal("my-key".into())),
        id(loc, "value"),
      ),
    )]);
    assert_eq!(expr(set), r#"(obj,value)=>{obj["my-key"]=value;}"#);
  }

  #[test]
  fn builds_declarations() {
    let loc = Loc(0, 0);
    let decl = var_decl(loc, VarDeclMode::Let, vec![
      ("_a".to_string(), Some(string(loc, "A"))),
      ("_b".to_string(), None),
    ]);
    assert_eq!(
      emit_stmt(&decl, EmitOptions::minified()).unwrap(),
      r#"let _a="A",_b;"#
    );
    assert_eq!(expr(void_zero(loc)), "void 0");
    assert_eq!(
      emit_stmt(&export_default(loc, "_default"), EmitOptions::minified()).unwrap(),
      "export default _default;"
    );
  }
}
