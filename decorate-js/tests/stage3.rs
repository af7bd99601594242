use decorate_js::transform;
use decorate_js::transform_source;
use decorate_js::DecorateOptions;
use decorate_js::MetadataMode;
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

#[test]
fn decorated_class_field_and_method() {
  assert_lowers(
    &DecorateOptions::stage3(),
    r#"
      @Dec
      export class A {
        @Field x = 1;
        y = 2;
        @Method m() {}
      }
    "#,
    r#"
      import { __esDecorate, __runInitializers } from "tslib";
      let _className = "A", _classDecorators = [Dec], _classDescriptor, _classExtraInitializers = [], _classThis, _metadata, _x_decorators, _x_initializers = [], _x_extraInitializers = [], _instanceExtraInitializers = [];
      let A = class A {
        static {
          _classThis = this;
          _x_decorators = [Field];
          __esDecorate(null, null, _x_decorators, {
            kind: "field",
            name: "x",
            static: false,
            private: false,
            access: {
              has: obj => "x" in obj,
              get: obj => obj.x,
              set: (obj, value) => {
                obj.x = value;
              },
            },
            metadata: _metadata,
          }, _x_initializers, _x_extraInitializers);
          __esDecorate(this, null, [Method], {
            kind: "method",
            name: "m",
            static: false,
            private: false,
            access: { has: obj => "m" in obj, get: obj => obj.m },
            metadata: _metadata,
          }, null, _instanceExtraInitializers);
          __esDecorate(null, _classDescriptor = { value: _classThis }, _classDecorators, {
            kind: "class",
            name: _className,
            metadata: _metadata,
          }, null, _classExtraInitializers);
          _classThis = _classDescriptor.value;
          __runInitializers(_classThis, _classExtraInitializers);
        }
        constructor() {
          __runInitializers(this, _instanceExtraInitializers);
          Object.defineProperty(this, "x", {
            enumerable: true,
            configurable: true,
            writable: true,
            value: __runInitializers(this, _x_initializers, 1),
          });
          __runInitializers(this, _x_extraInitializers);
          Object.defineProperty(this, "y", {
            enumerable: true,
            configurable: true,
            writable: true,
            value: 2,
          });
        }
        m() {}
      };
      A = _classThis;
      export { A };
    "#,
  );
}

#[test]
fn plain_fields_keep_declaration_order() {
  let options = DecorateOptions {
    metadata: MetadataMode::Disabled,
    ..DecorateOptions::stage3()
  };
  assert_lowers(
    &options,
    r#"
      class A {
        @d a = 1;
        b = this.a + 1;
      }
    "#,
    r#"
      import { __esDecorate, __runInitializers } from "tslib";
      let _className = "A", _a_decorators, _a_initializers = [], _a_extraInitializers = [];
      let A = class A {
        static {
          _a_decorators = [d];
          __esDecorate(null, null, _a_decorators, {
            kind: "field",
            name: "a",
            static: false,
            private: false,
            access: {
              has: obj => "a" in obj,
              get: obj => obj.a,
              set: (obj, value) => {
                obj.a = value;
              },
            },
          }, _a_initializers, _a_extraInitializers);
        }
        constructor() {
          Object.defineProperty(this, "a", {
            enumerable: true,
            configurable: true,
            writable: true,
            value: __runInitializers(this, _a_initializers, 1),
          });
          __runInitializers(this, _a_extraInitializers);
          Object.defineProperty(this, "b", {
            enumerable: true,
            configurable: true,
            writable: true,
            value: this.a + 1,
          });
        }
      };
    "#,
  );
}

#[test]
fn private_computed_and_static_fields_around_decorated_field() {
  let options = DecorateOptions {
    use_define_for_class_fields: false,
    metadata: MetadataMode::Disabled,
    ..DecorateOptions::stage3()
  };
  let out = transform_source(
    r#"
      class A {
        #p = 0;
        [k()] = this.#p;
        @d a = 1;
        c;
        static s = 2;
      }
    "#,
    &options,
    EmitOptions::minified(),
  )
  .unwrap();
  assert!(out.contains("_computedKey=k()"), "{out}");
  assert!(
    out.contains(
      "constructor(){this.#p=0;this[_computedKey]=this.#p;this.a=__runInitializers(this,_a_initializers,1);__runInitializers(this,_a_extraInitializers);}"
    ),
    "{out}"
  );
  assert!(out.contains("#p;"), "{out}");
  assert!(out.contains("static s=2;"), "{out}");
  assert!(!out.contains("c;"), "{out}");
}

#[test]
fn assignment_fields_and_inherited_metadata() {
  let options = DecorateOptions {
    use_define_for_class_fields: false,
    metadata: MetadataMode::Enabled,
    ..DecorateOptions::stage3()
  };
  assert_lowers(
    &options,
    r#"
      class B extends Base {
        constructor(a) {
          super(a);
          init();
        }
        @F x;
      }
    "#,
    r#"
      import { __esDecorate, __runInitializers } from "tslib";
      let _className = "B", _classSuper = Base, _x_decorators, _x_initializers = [], _x_extraInitializers = [];
      let B = class B extends _classSuper {
        static {
          const _metadata = Object.create(_classSuper[Symbol.metadata] ?? null);
          _x_decorators = [F];
          __esDecorate(null, null, _x_decorators, {
            kind: "field",
            name: "x",
            static: false,
            private: false,
            access: {
              has: obj => "x" in obj,
              get: obj => obj.x,
              set: (obj, value) => {
                obj.x = value;
              },
            },
            metadata: _metadata,
          }, _x_initializers, _x_extraInitializers);
          Object.defineProperty(this, Symbol.metadata, {
            enumerable: true,
            configurable: true,
            writable: true,
            value: _metadata,
          });
        }
        constructor(a) {
          super(a);
          this.x = __runInitializers(this, _x_initializers, void 0);
          __runInitializers(this, _x_extraInitializers);
          init();
        }
      };
    "#,
  );
}

#[test]
fn loose_metadata_without_superclass() {
  let options = DecorateOptions {
    loose: true,
    metadata: MetadataMode::Enabled,
    ..DecorateOptions::stage3()
  };
  assert_lowers(
    &options,
    "@D class C {}",
    r#"
      import { __esDecorate, __runInitializers } from "tslib";
      let _className = "C", _classDecorators = [D], _classDescriptor, _classExtraInitializers = [], _classThis;
      let C = class C {
        static {
          _classThis = this;
          const _metadata = Object.create(null);
          __esDecorate(null, _classDescriptor = { value: _classThis }, _classDecorators, {
            kind: "class",
            name: _className,
            metadata: _metadata,
          }, null, _classExtraInitializers);
          _classThis = _classDescriptor.value;
          _classThis[Symbol.metadata] = _metadata;
          __runInitializers(_classThis, _classExtraInitializers);
        }
      };
      C = _classThis;
    "#,
  );
}

#[test]
fn derived_class_gets_synthesized_constructor() {
  let options = DecorateOptions {
    metadata: MetadataMode::Disabled,
    ..DecorateOptions::stage3()
  };
  assert_lowers(
    &options,
    r#"
      class D extends mixin(A, B) {
        @F "my-key" = 3;
      }
    "#,
    r#"
      import { __esDecorate, __runInitializers } from "tslib";
      let _className = "D", _classSuper = mixin(A, B), _myKey_decorators, _myKey_initializers = [], _myKey_extraInitializers = [];
      let D = class D extends _classSuper {
        static {
          _myKey_decorators = [F];
          __esDecorate(null, null, _myKey_decorators, {
            kind: "field",
            name: "my-key",
            static: false,
            private: false,
            access: {
              has: obj => "my-key" in obj,
              get: obj => obj["my-key"],
              set: (obj, value) => {
                obj["my-key"] = value;
              },
            },
          }, _myKey_initializers, _myKey_extraInitializers);
        }
        constructor(...args) {
          super(...args);
          Object.defineProperty(this, "my-key", {
            enumerable: true,
            configurable: true,
            writable: true,
            value: __runInitializers(this, _myKey_initializers, 3),
          });
          __runInitializers(this, _myKey_extraInitializers);
        }
      };
    "#,
  );
}

#[test]
fn accessors_and_static_methods() {
  let options = DecorateOptions {
    metadata: MetadataMode::Disabled,
    ..DecorateOptions::stage3()
  };
  assert_lowers(
    &options,
    r#"
      export default class {
        @G get v() {
          return 1;
        }
        @S set v(x) {}
        @M static s() {}
      }
    "#,
    r#"
      import { __esDecorate, __runInitializers } from "tslib";
      let _className = "default", _instanceExtraInitializers = [], _staticExtraInitializers = [];
      let _default = class {
        static {
          __esDecorate(this, null, [M], {
            kind: "method",
            name: "s",
            static: true,
            private: false,
            access: { has: obj => "s" in obj, get: obj => obj.s },
          }, null, _staticExtraInitializers);
          __esDecorate(this, null, [G], {
            kind: "getter",
            name: "v",
            static: false,
            private: false,
            access: { has: obj => "v" in obj, get: obj => obj.v },
          }, null, _instanceExtraInitializers);
          __esDecorate(this, null, [S], {
            kind: "setter",
            name: "v",
            static: false,
            private: false,
            access: {
              has: obj => "v" in obj,
              set: (obj, value) => {
                obj.v = value;
              },
            },
          }, null, _instanceExtraInitializers);
          __runInitializers(this, _staticExtraInitializers);
        }
        constructor() {
          __runInitializers(this, _instanceExtraInitializers);
        }
        get v() {
          return 1;
        }
        set v(x) {}
        static s() {}
      };
      export default _default;
    "#,
  );
}

#[test]
fn temporaries_avoid_existing_names() {
  let options = DecorateOptions {
    metadata: MetadataMode::Disabled,
    ..DecorateOptions::stage3()
  };
  let out = lower(
    r#"
      let _className = 1;
      @D class A {}
      @D class B {}
    "#,
    &options,
  );
  assert!(out.contains(r#"let _className2="A""#));
  assert!(out.contains(r#"let _className3="B""#));
  assert!(out.contains("B=_classThis2;"));
}
