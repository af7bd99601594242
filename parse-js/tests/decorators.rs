use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use parse_js::parse;
use parse_js::to_json;

#[test]
fn decorated_class_span_includes_decorators() {
  let src = "let x;\n@dec class A {}";
  let ast = parse(src).expect("parse decorated class");
  let stmt = &ast.stx.body[1];
  assert_eq!(stmt.loc, Loc(7, src.len()));
}

#[test]
fn member_decorators_record_their_expressions() {
  let src = "class A { @a.b(1) @(c) m() {} }";
  let ast = parse(src).expect("parse member decorators");
  let Stmt::ClassDecl(decl) = ast.stx.body[0].stx.as_ref() else {
    panic!("expected class declaration");
  };
  let ClassMember::Method(method) = &decl.stx.members[0] else {
    panic!("expected method");
  };
  let decorators = &method.stx.decorators;
  assert_eq!(decorators.len(), 2);
  assert_eq!(&src[decorators[0].loc.0..decorators[0].loc.1], "@a.b(1)");
  assert_eq!(&src[decorators[1].loc.0..decorators[1].loc.1], "@(c)");
}

#[test]
fn json_output_tags_node_types() {
  let ast = parse("@dec export class A { x = 1; }").expect("parse");
  let json = to_json(&ast).expect("serialize");
  assert!(json.contains(r#""$t":"ClassDecl""#));
  assert!(json.contains(r#""$t":"Field""#));
}
