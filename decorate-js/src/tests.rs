use crate::err;
use crate::transform;
use crate::transform_source;
use crate::DecorateError;
use crate::DecorateOptions;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use emit_js::emit_top_level;
use emit_js::EmitOptions;
use parse_js::ast::stmt::Stmt;
use parse_js::parse;

fn diagnostics(source: &str, options: &DecorateOptions) -> Vec<Diagnostic> {
  let mut top = parse(source).unwrap();
  transform(&mut top, FileId(3), options).unwrap_err()
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
  diagnostics.iter().map(|d| d.code).collect()
}

#[test]
fn computed_keys_are_rejected_in_both_pipelines() {
  for options in [DecorateOptions::legacy(), DecorateOptions::stage3()] {
    let diags = diagnostics("class A { @D [k] = 1; }", &options);
    assert_eq!(codes(&diags), vec![err::COMPUTED_KEY]);
    assert_eq!(diags[0].primary.file, FileId(3));
  }
}

#[test]
fn private_members_are_rejected() {
  let diags = diagnostics("class A { @D #x; @D #m() {} }", &DecorateOptions::legacy());
  assert_eq!(codes(&diags), vec![err::PRIVATE_KEY, err::PRIVATE_KEY]);
  assert!(diags[0].message.contains("#x"));
}

#[test]
fn stage3_parameter_decorators_are_rejected() {
  let source = "class A { m(@P a, @Q b) {} }";
  let diags = diagnostics(source, &DecorateOptions::stage3());
  assert_eq!(codes(&diags), vec![
    err::STAGE3_PARAMETER_DECORATOR,
    err::STAGE3_PARAMETER_DECORATOR
  ]);
  assert_eq!(diags[0].notes.len(), 1);

  // The same input is fine for legacy decorators.
  transform_source(source, &DecorateOptions::legacy(), EmitOptions::minified()).unwrap();
}

#[test]
fn decorated_class_expressions_are_rejected() {
  let diags = diagnostics("let C = class { @D m() {} };", &DecorateOptions::legacy());
  assert_eq!(codes(&diags), vec![err::CLASS_EXPRESSION_DECORATOR]);

  let out = transform_source("let C = class { m() {} };", &DecorateOptions::legacy(), EmitOptions::minified()).unwrap();
  assert_eq!(out, "let C=class{m(){}};");
}

#[test]
fn stage3_static_fields_are_rejected() {
  let diags = diagnostics("class A { @D static x = 1; }", &DecorateOptions::stage3());
  assert_eq!(codes(&diags), vec![err::STAGE3_STATIC_FIELD]);
  assert!(diags[0].message.contains("`x`"));
}

#[test]
fn stage3_derived_constructor_needs_top_level_super_call() {
  let source = "class C extends B { constructor(x) { if (x) { super(1); } else { super(2); } } @d a = 1; }";
  let diags = diagnostics(source, &DecorateOptions::stage3());
  assert_eq!(codes(&diags), vec![err::MISSING_SUPER_CALL]);
  assert_eq!(diags[0].notes.len(), 1);

  let diags = diagnostics(
    "class C extends B { constructor() { const r = super(); } @d m() {} }",
    &DecorateOptions::stage3(),
  );
  assert_eq!(codes(&diags), vec![err::MISSING_SUPER_CALL]);

  // Nothing needs to run in the constructor, so there is nothing to place.
  let source = "class C extends B { constructor(x) { if (x) { super(1); } else { super(2); } } @d static m() {} }";
  transform_source(source, &DecorateOptions::stage3(), EmitOptions::minified()).unwrap();
}

#[test]
fn anonymous_declaration_is_rejected() {
  let mut top = parse("@D class A {}").unwrap();
  let Stmt::ClassDecl(decl) = top.stx.body[0].stx.as_mut() else {
    panic!("expected a class declaration");
  };
  decl.stx.name = None;
  let diags = transform(&mut top, FileId(0), &DecorateOptions::legacy()).unwrap_err();
  assert_eq!(codes(&diags), vec![err::MISSING_CLASS_NAME]);
}

#[test]
fn every_problem_is_reported() {
  let source = r#"
    class A { @D [a] = 1; }
    function f() {
      class B { @D #b; }
    }
  "#;
  let diags = diagnostics(source, &DecorateOptions::legacy());
  let mut found = codes(&diags);
  found.sort();
  assert_eq!(found, vec![err::COMPUTED_KEY, err::PRIVATE_KEY]);
}

#[test]
fn output_is_deterministic() {
  let source = r#"
    @A @B export class X { @F f; @M m(@P p) {} static s() {} }
    @C class Y {}
  "#;
  for options in [
    DecorateOptions::legacy(),
    DecorateOptions::stage3(),
    DecorateOptions {
      metadata: crate::MetadataMode::Enabled,
      ..DecorateOptions::legacy()
    },
  ] {
    let first = transform_source(source, &options, EmitOptions::canonical());
    let second = transform_source(source, &options, EmitOptions::canonical());
    match (first, second) {
      (Ok(a), Ok(b)) => assert_eq!(a, b),
      (Err(DecorateError::Transform(a)), Err(DecorateError::Transform(b))) => assert_eq!(a, b),
      (a, b) => panic!("runs disagree: {a:?} vs {b:?}"),
    };
  }
}

#[test]
fn helpers_are_not_shared_between_units() {
  let options = DecorateOptions::legacy();
  let first = transform_source("@D class A {}", &options, EmitOptions::minified()).unwrap();
  let second = transform_source("@D class B {}", &options, EmitOptions::minified()).unwrap();
  assert!(first.starts_with(r#"import{__decorate}from"tslib";"#));
  assert!(second.starts_with(r#"import{__decorate}from"tslib";"#));
}

#[test]
fn helper_module_is_configurable() {
  let options = DecorateOptions {
    helper_module: "./runtime.js".to_string(),
    ..DecorateOptions::legacy()
  };
  let out = transform_source("@D class A {}", &options, EmitOptions::minified()).unwrap();
  assert_eq!(out, r#"import{__decorate}from"./runtime.js";class A{}A=__decorate([D],A);"#);
}

#[test]
fn transform_source_errors() {
  let err = transform_source("class {", &DecorateOptions::legacy(), EmitOptions::minified()).unwrap_err();
  assert!(matches!(err, DecorateError::Syntax(_)));
  assert!(err.to_string().starts_with("syntax error: "));

  let err = transform_source("class A { @D [k]() {} }", &DecorateOptions::legacy(), EmitOptions::minified()).unwrap_err();
  let DecorateError::Transform(diags) = &err else {
    panic!("expected transform diagnostics, got {err:?}");
  };
  assert_eq!(codes(diags), vec![err::COMPUTED_KEY]);
  assert!(err.to_string().contains("error[DECO0001]"));
}

#[test]
fn failed_transform_leaves_no_helper_imports() {
  let mut top = parse("@D class A {} class B { @D [k] = 1; }").unwrap();
  assert!(transform(&mut top, FileId(0), &DecorateOptions::legacy()).is_err());
  let out = emit_top_level(&top, EmitOptions::minified()).unwrap();
  assert!(!out.contains("import"));
}
