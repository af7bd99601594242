use super::Parser;
use crate::ast::class_or_object::AccessorKind;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::expr::Expr;
use crate::ast::func::FuncBody;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportNames;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::lex::Lexer;
use crate::operator::OperatorName;
use crate::parse;
use crate::token::TT;

fn single_stmt(source: &str) -> Node<Stmt> {
  let mut top = parse(source).unwrap();
  assert_eq!(top.stx.body.len(), 1, "expected a single statement in {source:?}");
  top.stx.body.pop().unwrap()
}

fn class_decl(source: &str) -> Node<ClassDecl> {
  let stmt = single_stmt(source);
  match *stmt.stx {
    Stmt::ClassDecl(decl) => decl,
    other => panic!("expected class declaration, got {other:?}"),
  }
}

fn expr(source: &str) -> Node<Expr> {
  let stmt = single_stmt(source);
  match *stmt.stx {
    Stmt::Expr(stmt) => stmt.stx.expr,
    other => panic!("expected expression statement, got {other:?}"),
  }
}

#[test]
fn test_parser_checkpoints() {
  let lexer = Lexer::new("let x = 1;");
  let mut p = Parser::new(lexer).unwrap();
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(t.typ, TT::Identifier);

  p.consume();
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(t.typ, TT::Identifier);
  assert_eq!(p.str(t.loc), "x");
  assert_eq!(p.since_checkpoint(&cp), crate::loc::Loc(0, 5));

  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert!(p.is_contextual(p.peek(), "let"));

  // Consuming at the end keeps returning EOF.
  let mut p = Parser::new(Lexer::new("")).unwrap();
  assert_eq!(p.consume().typ, TT::EOF);
  assert_eq!(p.consume().typ, TT::EOF);
}

#[test]
fn test_parse_class_decorators_before_and_after_export() {
  let decl = class_decl("@a @b.c export class A {}");
  assert_eq!(decl.stx.decorators.len(), 2);
  assert!(decl.stx.export);
  assert!(!decl.stx.export_default);
  assert_eq!(decl.stx.name.as_ref().unwrap().stx.name, "A");

  let decl = class_decl("export @a() class B {}");
  assert_eq!(decl.stx.decorators.len(), 1);
  assert!(matches!(
    decl.stx.decorators[0].stx.expression.stx.as_ref(),
    Expr::Call(_)
  ));

  let decl = class_decl("export default @a class {}");
  assert!(decl.stx.export_default);
  assert!(decl.stx.name.is_none());
}

#[test]
fn test_parse_class_members() {
  let decl = class_decl(
    r#"
    class A {
      @dec field = 1
      other
      static count;
      accessor acc = 2;
      static accessor sacc;
      @m method(@p a, b = 2, ...rest) {}
      get value() { return 1 }
      set value(v) {}
      static async *gen() {}
      #secret = 3;
      [computed]() {}
      "quoted key" = 4;
      static { this.count = 0; }
      static = 5;
      get;
    }
    "#,
  );
  let members = &decl.stx.members;
  assert_eq!(members.len(), 15);

  let ClassMember::Field(field) = &members[0] else { panic!() };
  assert_eq!(field.stx.decorators.len(), 1);
  assert_eq!(field.stx.key.direct_name(), Some("field"));
  assert!(field.stx.value.is_some());

  let ClassMember::Field(other) = &members[1] else { panic!() };
  assert!(other.stx.value.is_none());
  assert!(!other.stx.static_);

  assert!(members[2].is_static());

  let ClassMember::Field(acc) = &members[3] else { panic!() };
  assert!(acc.stx.accessor && !acc.stx.static_);
  let ClassMember::Field(sacc) = &members[4] else { panic!() };
  assert!(sacc.stx.accessor && sacc.stx.static_);

  let ClassMember::Method(method) = &members[5] else { panic!() };
  let params = &method.stx.func.stx.parameters;
  assert_eq!(params.len(), 3);
  assert_eq!(params[0].stx.decorators.len(), 1);
  assert!(params[1].stx.default_value.is_some());
  assert!(params[2].stx.rest);

  let ClassMember::Accessor(getter) = &members[6] else { panic!() };
  assert_eq!(getter.stx.kind, AccessorKind::Getter);
  let ClassMember::Accessor(setter) = &members[7] else { panic!() };
  assert_eq!(setter.stx.kind, AccessorKind::Setter);

  let ClassMember::Method(gen) = &members[8] else { panic!() };
  assert!(gen.stx.static_ && gen.stx.func.stx.async_ && gen.stx.func.stx.generator);

  let ClassMember::Field(secret) = &members[9] else { panic!() };
  let ClassOrObjKey::Direct(key) = &secret.stx.key else { panic!() };
  assert!(key.stx.is_private());
  assert_eq!(key.stx.key, "#secret");

  assert!(matches!(members[10].key(), Some(ClassOrObjKey::Computed(_))));
  assert_eq!(members[11].key().unwrap().direct_name(), Some("quoted key"));
  assert!(matches!(members[12], ClassMember::StaticBlock(_)));
  assert_eq!(members[13].key().unwrap().direct_name(), Some("static"));
  assert!(!members[13].is_static());
  assert_eq!(members[14].key().unwrap().direct_name(), Some("get"));
}

#[test]
fn test_parse_class_field_requires_terminator() {
  let err = parse("class A { a b }").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("`;` or line terminator"));
}

#[test]
fn test_parse_precedence() {
  let e = expr("a + b * c;");
  let Expr::Binary(add) = e.stx.as_ref() else { panic!() };
  assert_eq!(add.stx.operator, OperatorName::Addition);
  let Expr::Binary(mul) = add.stx.right.stx.as_ref() else { panic!() };
  assert_eq!(mul.stx.operator, OperatorName::Multiplication);

  // Right associative.
  let e = expr("a = b = c;");
  let Expr::Binary(outer) = e.stx.as_ref() else { panic!() };
  assert!(matches!(outer.stx.left.stx.as_ref(), Expr::Id(_)));
  assert!(matches!(outer.stx.right.stx.as_ref(), Expr::Binary(_)));

  let e = expr("2 ** 3 ** 2;");
  let Expr::Binary(pow) = e.stx.as_ref() else { panic!() };
  assert!(matches!(pow.stx.left.stx.as_ref(), Expr::LitNum(_)));

  let e = expr("a ? b : c ? d : e;");
  let Expr::Cond(cond) = e.stx.as_ref() else { panic!() };
  assert!(matches!(cond.stx.alternate.stx.as_ref(), Expr::Cond(_)));

  let e = expr("typeof a.b + 1;");
  let Expr::Binary(add) = e.stx.as_ref() else { panic!() };
  assert!(matches!(add.stx.left.stx.as_ref(), Expr::Unary(_)));
}

#[test]
fn test_parse_arrow_functions() {
  let binding = expr("x => x + 1;");
  let Expr::ArrowFunc(f) = binding.stx.as_ref() else { panic!() };
  assert_eq!(f.stx.func.stx.parameters.len(), 1);

  let binding = expr("async (a, {b}, [c] = []) => { return a; };");

  let Expr::ArrowFunc(f) = binding.stx.as_ref() else {
    panic!()
  };
  assert!(f.stx.func.stx.async_);
  assert_eq!(f.stx.func.stx.parameters.len(), 3);

  // A parenthesised expression is not an arrow function.
  assert!(matches!(expr("(a, b);").stx.as_ref(), Expr::Binary(_)));
  assert!(matches!(expr("async(a);").stx.as_ref(), Expr::Call(_)));
}

#[test]
fn test_parse_member_chains() {
  let binding = expr("a?.b[c](d, ...e);");
  let Expr::Call(call) = binding.stx.as_ref() else { panic!() };
  assert_eq!(call.stx.arguments.len(), 2);
  assert!(call.stx.arguments[1].stx.spread);
  let Expr::ComputedMember(computed) = call.stx.callee.stx.as_ref() else { panic!() };
  let Expr::Member(member) = computed.stx.object.stx.as_ref() else { panic!() };
  assert!(member.stx.optional_chaining);
  assert_eq!(member.stx.right, "b");

  let e = expr("new a.B(1).c;");
  let Expr::Member(member) = e.stx.as_ref() else { panic!() };
  let Expr::New(new) = member.stx.left.stx.as_ref() else { panic!() };
  assert_eq!(new.stx.arguments.len(), 1);
  assert!(matches!(new.stx.callee.stx.as_ref(), Expr::Member(_)));
}

#[test]
fn test_parse_object_literal() {
  let binding = expr("({a, b: 1, [c]: 2, get d() {}, async e() {}, ...f});");
  let Expr::LitObj(obj) = binding.stx.as_ref() else {
    panic!()
  };
  assert_eq!(obj.stx.members.len(), 6);
}

#[test]
fn test_parse_asi() {
  let top = parse("let a = 1\nlet b = 2\na\n++b").unwrap();
  assert_eq!(top.stx.body.len(), 4);
  let Stmt::Expr(last) = top.stx.body[3].stx.as_ref() else { panic!() };
  assert!(matches!(last.stx.expr.stx.as_ref(), Expr::Unary(_)));

  let top = parse("function f() { return\n1 }").unwrap();
  let Stmt::FunctionDecl(f) = top.stx.body[0].stx.as_ref() else { panic!() };
  let FuncBody::Block(body) = &f.stx.function.stx.body else { panic!() };
  assert_eq!(body.len(), 2);
  let Stmt::Return(ret) = body[0].stx.as_ref() else { panic!() };
  assert!(ret.stx.value.is_none());
}

#[test]
fn test_parse_imports_and_exports() {
  let top = parse(
    r#"
    import "side-effect";
    import def, { a, b as c, default as d } from "m";
    import * as ns from "n";
    export { a, c as default };
    export * as all from "m";
    export const x = 1, y = 2;
    export default function () {}
    "#,
  )
  .unwrap();
  let body = &top.stx.body;
  assert_eq!(body.len(), 7);

  let Stmt::Import(side) = body[0].stx.as_ref() else { panic!() };
  assert!(side.stx.default.is_none() && side.stx.names.is_none());

  let Stmt::Import(named) = body[1].stx.as_ref() else { panic!() };
  assert!(named.stx.default.is_some());
  let Some(ImportNames::Specific(names)) = &named.stx.names else { panic!() };
  assert_eq!(names.len(), 3);
  assert_eq!(names[2].stx.importable, "default");

  let Stmt::Import(ns) = body[2].stx.as_ref() else { panic!() };
  assert!(matches!(ns.stx.names, Some(ImportNames::All(_))));
  assert_eq!(ns.stx.module, "n");

  let Stmt::ExportList(list) = body[3].stx.as_ref() else { panic!() };
  let ExportNames::Specific(names) = &list.stx.names else { panic!() };
  assert_eq!(names[1].stx.alias.stx.name, "default");
  assert!(list.stx.from.is_none());

  let Stmt::ExportList(all) = body[4].stx.as_ref() else { panic!() };
  assert!(matches!(&all.stx.names, ExportNames::All(Some(_))));

  let Stmt::VarDecl(var) = body[5].stx.as_ref() else { panic!() };
  assert!(var.stx.export);
  assert_eq!(var.stx.declarators.len(), 2);

  let Stmt::FunctionDecl(func) = body[6].stx.as_ref() else { panic!() };
  assert!(func.stx.export_default && func.stx.name.is_none());
}

#[test]
fn test_parse_errors() {
  assert_eq!(
    parse("1 = 2;").unwrap_err().typ,
    SyntaxErrorType::InvalidAssigmentTarget
  );
  assert_eq!(
    parse("class {}").unwrap_err().typ,
    SyntaxErrorType::ExpectedSyntax("class name")
  );
  assert_eq!(
    parse("@dec function f() {}").unwrap_err().typ,
    SyntaxErrorType::ExpectedSyntax("class after decorators")
  );
  assert_eq!(
    parse("throw\nx;").unwrap_err().typ,
    SyntaxErrorType::LineTerminatorAfterThrow
  );
  assert_eq!(
    parse("switch (a) {}").unwrap_err().typ,
    SyntaxErrorType::UnsupportedSyntax("switch statement")
  );
  assert_eq!(
    parse("for (const a of b) {}").unwrap_err().typ,
    SyntaxErrorType::UnsupportedSyntax("for-in or for-of loop")
  );
}
