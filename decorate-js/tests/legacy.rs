use decorate_js::transform;
use decorate_js::DecorateOptions;
use decorate_js::EmissionOrder;
use decorate_js::HelperImportStrategy;
use diagnostics::FileId;
use emit_js::emit_top_level;
use emit_js::EmitOptions;
use similar::TextDiff;

fn print(source: &str) -> String {
  let top = parse_js::parse(source).expect("expected output must parse");
  emit_top_level(&top, EmitOptions::canonical()).unwrap()
}

fn lower(source: &str, options: &DecorateOptions) -> String {
  let mut top = parse_js::parse(source).unwrap();
  transform(&mut top, FileId(0), options).unwrap();
  emit_top_level(&top, EmitOptions::canonical()).unwrap()
}

#[track_caller]
fn assert_lowers(options: &DecorateOptions, source: &str, expected: &str) {
  let actual = lower(source, options);
  let expected = print(expected);
  if actual != expected {
    let diff = TextDiff::from_lines(&expected, &actual);
    panic!(
      "lowered output differs\n{}",
      diff.unified_diff().header("expected", "actual")
    );
  };
}

fn eager() -> DecorateOptions {
  DecorateOptions {
    helper_imports: HelperImportStrategy::Eager,
    ..DecorateOptions::legacy()
  }
}

#[test]
fn golden_exported_classes() {
  assert_lowers(
    &eager(),
    r#"
      function ClassDe(Clazz) {
        return Clazz;
      }
      function ClassDe2(Clazz) {
        return Clazz;
      }
      function PropDe(target, prop) {}
      function PropDe2(target, prop) {}
      function AccDe(target, prop) {}
      function MethodDe(target, prop) {}
      function ParamDe(target, prop, index) {}

      @ClassDe
      @ClassDe2
      export class A {
        @PropDe @PropDe2 propa;
        @PropDe propinit = 1;
        @PropDe static staticprop = 1;
        @AccDe get acc() {
          return 1;
        }
        set acc(val) {}
        @MethodDe me() {}
        @MethodDe me2(@ParamDe a1) {}
        @MethodDe static staticme() {}
      }

      @ClassDe
      export class B {}

      @ClassDe
      export default class {}
    "#,
    r#"
      import { __param } from "tslib";
      import { __decorate } from "tslib";
      function ClassDe(Clazz) {
        return Clazz;
      }
      function ClassDe2(Clazz) {
        return Clazz;
      }
      function PropDe(target, prop) {}
      function PropDe2(target, prop) {}
      function AccDe(target, prop) {}
      function MethodDe(target, prop) {}
      function ParamDe(target, prop, index) {}
      let A = class A {
        propa;
        propinit = 1;
        static staticprop = 1;
        get acc() {
          return 1;
        }
        set acc(val) {}
        me() {}
        me2(a1) {}
        static staticme() {}
      };
      __decorate([PropDe, PropDe2], A.prototype, "propa", void 0);
      __decorate([PropDe], A.prototype, "propinit", void 0);
      __decorate([AccDe], A.prototype, "acc", null);
      __decorate([MethodDe], A.prototype, "me", null);
      __decorate([MethodDe, __param(0, ParamDe)], A.prototype, "me2", null);
      __decorate([PropDe], A, "staticprop", void 0);
      __decorate([MethodDe], A, "staticme", null);
      A = __decorate([ClassDe, ClassDe2], A);
      export { A };
      let B = class B {};
      B = __decorate([ClassDe], B);
      export { B };
      let _default = class {};
      _default = __decorate([ClassDe], _default);
      export default _default;
    "#,
  );
}

#[test]
fn golden_deferred_methods() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      class Cat {
        @MethodDec method() {}
        @MethodDec static methodStatic() {}
        @MethodDec methodArg(@ArgDec aaa) {}
        @MethodDec static methodArgStatic(@ArgDec aaa) {}
      }
    "#,
    r#"
      import { __decorate, __param } from "tslib";
      class Cat {
        method() {}
        static methodStatic() {}
        methodArg(aaa) {}
        static methodArgStatic(aaa) {}
      }
      __decorate([MethodDec], Cat.prototype, "method", null);
      __decorate([MethodDec, __param(0, ArgDec)], Cat.prototype, "methodArg", null);
      __decorate([MethodDec], Cat, "methodStatic", null);
      __decorate([MethodDec, __param(0, ArgDec)], Cat, "methodArgStatic", null);
    "#,
  );
}

#[test]
fn instance_then_static_then_class() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      @C
      class K {
        @S static s = 1;
        @F f;
        @M m(a, @P b, @Q @R c) {}
      }
    "#,
    r#"
      import { __decorate, __param } from "tslib";
      class K {
        static s = 1;
        f;
        m(a, b, c) {}
      }
      __decorate([F], K.prototype, "f", void 0);
      __decorate([M, __param(1, P), __param(2, Q), __param(2, R)], K.prototype, "m", null);
      __decorate([S], K, "s", void 0);
      K = __decorate([C], K);
    "#,
  );
}

#[test]
fn member_calls_before_declaration() {
  let options = DecorateOptions {
    emission_order: EmissionOrder::BeforeDeclaration,
    ..DecorateOptions::legacy()
  };
  assert_lowers(
    &options,
    r#"
      @D
      export default class A {
        @P x;
      }
    "#,
    r#"
      import { __decorate } from "tslib";
      __decorate([P], A.prototype, "x", void 0);
      let A = class A {
        x;
      };
      A = __decorate([D], A);
      export default A;
    "#,
  );
}

#[test]
fn constructor_parameters_decorate_the_class() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      class Service {
        constructor(@Inject(Token) a, b) {
          this.a = a;
        }
      }
    "#,
    r#"
      import { __decorate, __param } from "tslib";
      class Service {
        constructor(a, b) {
          this.a = a;
        }
      }
      Service = __decorate([__param(0, Inject(Token))], Service);
    "#,
  );
}

#[test]
fn auto_accessors_and_literal_keys() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      class A {
        @D accessor x = 1;
        @D "my-key" = 2;
        @D set v(@P value) {}
      }
    "#,
    r#"
      import { __decorate, __param } from "tslib";
      class A {
        accessor x = 1;
        "my-key" = 2;
        set v(value) {}
      }
      __decorate([D], A.prototype, "x", void 0);
      __decorate([D], A.prototype, "my-key", void 0);
      __decorate([D, __param(0, P)], A.prototype, "v", null);
    "#,
  );
}

#[test]
fn numeric_keys_use_canonical_property_names() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      class A {
        @D 1e21 = 1;
        @D 0x10() {}
      }
    "#,
    r#"
      import { __decorate } from "tslib";
      class A {
        1e21 = 1;
        16() {}
      }
      __decorate([D], A.prototype, "1e+21", void 0);
      __decorate([D], A.prototype, "16", null);
    "#,
  );
}

#[test]
fn shadowed_helper_gets_fresh_name() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      function f(__decorate) {
        return __decorate;
      }
      @D class A {}
    "#,
    r#"
      import { __decorate as _decorate } from "tslib";
      function f(__decorate) {
        return __decorate;
      }
      class A {}
      A = _decorate([D], A);
    "#,
  );
}

#[test]
fn existing_import_alias_is_reused() {
  for options in [eager(), DecorateOptions::legacy()] {
    assert_lowers(
      &options,
      r#"
        import { __decorate as dec } from "tslib";
        @D class A {}
      "#,
      r#"
        import { __decorate as dec } from "tslib";
        class A {}
        A = dec([D], A);
      "#,
    );
  }
}

#[test]
fn nested_declarations_are_lowered_in_place() {
  assert_lowers(
    &DecorateOptions::legacy(),
    r#"
      function make() {
        @D class Inner {}
        return Inner;
      }
      if (x) {
        class Plain {}
        @E class Other {}
      }
    "#,
    r#"
      import { __decorate } from "tslib";
      function make() {
        class Inner {}
        Inner = __decorate([D], Inner);
        return Inner;
      }
      if (x) {
        class Plain {}
        class Other {}
        Other = __decorate([E], Other);
      }
    "#,
  );
}

#[test]
fn undecorated_program_is_unchanged() {
  let source = r#"
    import { x } from "m";
    export class A extends B {
      y = 1;
      constructor(a) {
        super(a);
      }
      static m() {}
    }
    export default class {}
  "#;
  for options in [eager(), DecorateOptions::legacy(), DecorateOptions::stage3()] {
    assert_eq!(lower(source, &options), print(source));
  }
}
