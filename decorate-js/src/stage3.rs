//! Lowering to the standard decorators protocol through `__esDecorate` and `__runInitializers`.
//!
//! Temporaries are declared in one `let` ahead of the class. Decorator application runs in a static block prepended to
//! the class body, where `this` is the class. When any instance member is decorated, instance fields are removed from
//! the body and initialized in the constructor instead, in declaration order, so decorated and plain fields still see
//! each other's values.

use crate::build;
use crate::build::PropertyKey;
use crate::err;
use crate::helpers::Helper;
use crate::options::MetadataMode;
use crate::unit::member_loc;
use crate::unit::plain_property_key;
use crate::unit::ClassUnit;
use crate::unit::UnitContext;
use parse_js::ast::class_or_object::AccessorKind;
use parse_js::ast::class_or_object::ClassField;
use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::expr::Decorator;
use parse_js::ast::expr::Expr;
use parse_js::ast::func::Func;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::VarDeclMode;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use parse_js::operator::OperatorName;
use std::mem::take;

pub(crate) struct Stage3Output {
  /// `let _className = "A", ...;`
  pub temps: Node<Stmt>,
  /// Holds the possibly replaced class after decoration, if the class itself is decorated.
  pub class_this: Option<String>,
}

struct ClassTemps {
  decorators: String,
  descriptor: String,
  extra_initializers: String,
  this: String,
}

struct FieldTemps {
  decorators: String,
  initializers: String,
  extra_initializers: String,
}

enum MethodKind {
  Method,
  Getter,
  Setter,
}

impl MethodKind {
  fn as_str(&self) -> &'static str {
    match self {
      MethodKind::Method => "method",
      MethodKind::Getter => "getter",
      MethodKind::Setter => "setter",
    }
  }
}

/// Where a field moved into the constructor is installed on `this`.
enum FieldKey {
  Property(PropertyKey),
  /// `#name`, which stays declared in the class body and can only be assigned.
  Private(String),
  /// A computed key, evaluated once into the named temp.
  Computed(String),
}

/// A field initialization spliced into the constructor.
enum FieldInit {
  Decorated {
    loc: Loc,
    key: PropertyKey,
    value: Option<Node<Expr>>,
    initializers: String,
    extra_initializers: String,
  },
  Plain {
    loc: Loc,
    key: FieldKey,
    value: Option<Node<Expr>>,
  },
}

enum Plan {
  Field {
    loc: Loc,
    key: PropertyKey,
    decorators: Vec<Node<Expr>>,
    temps: FieldTemps,
  },
  Method {
    loc: Loc,
    key: PropertyKey,
    static_: bool,
    kind: MethodKind,
    decorators: Vec<Node<Expr>>,
  },
}

impl Plan {
  fn is_static(&self) -> bool {
    match self {
      Plan::Field { .. } => false,
      Plan::Method { static_, .. } => *static_,
    }
  }
}

fn decorator_exprs(decorators: Vec<Node<Decorator>>) -> Vec<Node<Expr>> {
  decorators
    .into_iter()
    .map(|d| d.stx.expression)
    .collect()
}

fn reject_param_decorators(ctx: &mut UnitContext, func: &mut Node<Func>) {
  for param in func.stx.parameters.iter_mut() {
    for decorator in take(&mut param.stx.decorators) {
      ctx.report(err::stage3_parameter_decorator(ctx.file, decorator.loc));
    }
  }
}

/// `{has: obj => "k" in obj, get: obj => obj.k, set: (obj, value) => { obj.k = value; }}`, with `get` and `set` included
/// as requested.
fn access_object(loc: Loc, key: &PropertyKey, get: bool, set: bool) -> Node<Expr> {
  let mut properties = vec![(
    "has",
    build::arrow(
      loc,
      &["obj"],
      build::binary(
        loc,
        OperatorName::In,
        build::string(loc, key.as_str()),
        build::id(loc, "obj"),
      ),
    ),
  )];
  if get {
    properties.push((
      "get",
      build::arrow(loc, &["obj"], build::property(loc, build::id(loc, "obj"), key)),
    ));
  };
  if set {
    properties.push((
      "set",
      build::arrow_block(loc, &["obj", "value"], vec![build::expr_stmt(
        loc,
        build::assign(
          loc,
          build::property(loc, build::id(loc, "obj"), key),
          build::id(loc, "value"),
        ),
      )]),
    ));
  };
  build::object(loc, properties)
}

struct Lowering<'c> {
  ctx: &'c mut UnitContext,
  es_decorate_helper: String,
  run_initializers_helper: String,
  metadata: Option<String>,
}

impl Lowering<'_> {
  fn with_metadata<'k>(&self, loc: Loc, mut properties: Vec<(&'k str, Node<Expr>)>) -> Node<Expr> {
    if let Some(metadata) = &self.metadata {
      properties.push(("metadata", build::id(loc, metadata)));
    };
    build::object(loc, properties)
  }

  fn member_context(&self, loc: Loc, kind: &str, key: &PropertyKey, static_: bool, access: Node<Expr>) -> Node<Expr> {
    self.with_metadata(loc, vec![
      ("kind", build::string(loc, kind)),
      ("name", build::string(loc, key.as_str())),
      ("static", build::boolean(loc, static_)),
      ("private", build::boolean(loc, false)),
      ("access", access),
    ])
  }

  fn es_decorate(&self, loc: Loc, arguments: Vec<Node<Expr>>) -> Node<Stmt> {
    build::expr_stmt(loc, build::call_id(loc, &self.es_decorate_helper, arguments))
  }

  fn run_initializers(&self, loc: Loc, arguments: Vec<Node<Expr>>) -> Node<Expr> {
    build::call_id(loc, &self.run_initializers_helper, arguments)
  }

  /// `Object.create(_classSuper[Symbol.metadata] ?? null)`, or `Object.create(null)` for a base class.
  fn create_metadata(&self, loc: Loc, super_temp: Option<&str>) -> Node<Expr> {
    let proto = match super_temp {
      Some(super_temp) => build::binary(
        loc,
        OperatorName::NullishCoalescing,
        build::computed_member(loc, build::id(loc, super_temp), build::symbol_metadata(loc)),
        build::null(loc),
      ),
      None => build::null(loc),
    };
    build::call(
      loc,
      build::member(loc, build::id(loc, "Object"), "create"),
      vec![proto],
    )
  }

  fn install_metadata(&self, loc: Loc, target: Node<Expr>, metadata: &str) -> Node<Stmt> {
    let expr = if self.ctx.options.loose {
      build::assign(
        loc,
        build::computed_member(loc, target, build::symbol_metadata(loc)),
        build::id(loc, metadata),
      )
    } else {
      build::call(
        loc,
        build::member(loc, build::id(loc, "Object"), "defineProperty"),
        vec![
          target,
          build::symbol_metadata(loc),
          build::data_descriptor(loc, build::id(loc, metadata)),
        ],
      )
    };
    build::expr_stmt(loc, expr)
  }

  /// Installs a field's initial value on `this`.
  fn install_field(&self, loc: Loc, key: &FieldKey, value: Node<Expr>) -> Node<Stmt> {
    let define = |name: Node<Expr>, value: Node<Expr>| {
      build::call(
        loc,
        build::member(loc, build::id(loc, "Object"), "defineProperty"),
        vec![build::this(loc), name, build::data_descriptor(loc, value)],
      )
    };
    let use_define = self.ctx.options.use_define_for_class_fields;
    let expr = match key {
      FieldKey::Property(key) if use_define => define(build::string(loc, key.as_str()), value),
      FieldKey::Computed(temp) if use_define => define(build::id(loc, temp), value),
      FieldKey::Property(key) => build::assign(loc, build::property(loc, build::this(loc), key), value),
      FieldKey::Computed(temp) => build::assign(
        loc,
        build::computed_member(loc, build::this(loc), build::id(loc, temp)),
        value,
      ),
      FieldKey::Private(name) => build::assign(loc, build::member(loc, build::this(loc), name.as_str()), value),
    };
    build::expr_stmt(loc, expr)
  }
}

/// The index of the first top-level `super(...)` call statement.
fn super_call_index(body: &[Node<Stmt>]) -> Option<usize> {
  body.iter().position(|stmt| {
    let Stmt::Expr(expr) = stmt.stx.as_ref() else {
      return false;
    };
    let Expr::Call(call) = expr.stx.expr.stx.as_ref() else {
      return false;
    };
    matches!(call.stx.callee.stx.as_ref(), Expr::Super(_))
  })
}

/// Splices `stmts` into the constructor after its top-level `super(...)` call, or at the start of a base class
/// constructor. Fails with the constructor's location if a derived constructor has no such call.
fn splice_into_constructor(
  members: &mut Vec<ClassMember>,
  insert_at: usize,
  derived: bool,
  loc: Loc,
  stmts: Vec<Node<Stmt>>,
) -> Result<(), Loc> {
  let existing = members
    .iter()
    .position(|m| matches!(m, ClassMember::Method(method) if method.stx.is_constructor()));
  let index = match existing {
    Some(index) => index,
    None => {
      let index = insert_at.min(members.len());
      members.insert(index, build::constructor(loc, derived));
      index
    }
  };
  let ClassMember::Method(method) = &mut members[index] else {
    return Ok(());
  };
  let constructor_loc = method.loc;
  match &mut method.stx.func.stx.body {
    FuncBody::Block(body) => {
      let at = match super_call_index(body) {
        Some(i) => i + 1,
        None if derived => return Err(constructor_loc),
        None => 0,
      };
      let tail = body.split_off(at);
      body.extend(stmts);
      body.extend(tail);
    }
    // Constructors always have block bodies.
    FuncBody::Expression(_) => {}
  };
  Ok(())
}

pub(crate) fn lower(ctx: &mut UnitContext, unit: &mut ClassUnit) -> Stage3Output {
  let loc = unit.loc;
  let es_decorate_helper = ctx.helper(Helper::EsDecorate);
  let run_initializers_helper = ctx.helper(Helper::RunInitializers);

  let mut temps: Vec<(String, Option<Node<Expr>>)> = Vec::new();
  let class_name = ctx.names.generate("className");
  temps.push((class_name.clone(), Some(build::string(loc, &unit.display_name))));

  let class_decorators = decorator_exprs(take(&mut unit.decorators));
  let class_temps = (!class_decorators.is_empty()).then(|| {
    let t = ClassTemps {
      decorators: ctx.names.generate("classDecorators"),
      descriptor: ctx.names.generate("classDescriptor"),
      extra_initializers: ctx.names.generate("classExtraInitializers"),
      this: ctx.names.generate("classThis"),
    };
    temps.push((t.decorators.clone(), Some(build::array(loc, class_decorators))));
    temps.push((t.descriptor.clone(), None));
    temps.push((t.extra_initializers.clone(), Some(build::array(loc, Vec::new()))));
    temps.push((t.this.clone(), None));
    t
  });

  let super_temp = unit.extends.take().map(|extends| {
    let name = ctx.names.generate("classSuper");
    unit.extends = Some(build::id(extends.loc, &name));
    temps.push((name.clone(), Some(extends)));
    name
  });

  let metadata = match ctx.options.metadata {
    MetadataMode::Disabled => None,
    MetadataMode::Enabled => Some(ctx.names.generate("metadata")),
    MetadataMode::Unset => {
      let name = ctx.names.generate("metadata");
      temps.push((name.clone(), None));
      Some(name)
    }
  };

  // Once the constructor runs decorator initializers, every instance field moves there too, so fields still
  // initialize in declaration order.
  let splice = unit
    .members
    .iter()
    .any(|m| !m.is_static() && !m.decorators().is_empty());

  let mut plans = Vec::new();
  let mut inits = Vec::new();
  let mut members = Vec::with_capacity(unit.members.len());
  for member in take(&mut unit.members) {
    let loc = member_loc(&member);
    match member {
      ClassMember::Field(mut field) if field.stx.decorators.is_empty() => {
        if !splice || field.stx.static_ || field.stx.accessor {
          members.push(ClassMember::Field(field));
          continue;
        };
        if let ClassOrObjKey::Direct(direct) = &field.stx.key {
          if direct.stx.is_private() {
            let key = FieldKey::Private(direct.stx.key.clone());
            if let Some(value) = field.stx.value.take() {
              inits.push(FieldInit::Plain {
                loc,
                key,
                value: Some(value),
              });
            };
            members.push(ClassMember::Field(field));
            continue;
          };
        };
        let ClassField { key, value, .. } = *field.stx;
        let key = match key {
          ClassOrObjKey::Direct(direct) => FieldKey::Property(plain_property_key(&direct.stx)),
          ClassOrObjKey::Computed(expr) => {
            let name = ctx.names.generate("computedKey");
            temps.push((name.clone(), Some(expr)));
            FieldKey::Computed(name)
          }
        };
        inits.push(FieldInit::Plain { loc, key, value });
      }
      ClassMember::Field(mut field) => {
        let decorators = decorator_exprs(take(&mut field.stx.decorators));
        let Some(key) = ctx.property_key(&field.stx.key) else {
          members.push(ClassMember::Field(field));
          continue;
        };
        if field.stx.static_ {
          let file = ctx.file;
          ctx.report(err::stage3_static_field(file, loc, key.as_str()));
          members.push(ClassMember::Field(field));
          continue;
        };
        let field_temps = FieldTemps {
          decorators: ctx.names.generate(&format!("{}_decorators", key.as_str())),
          initializers: ctx.names.generate(&format!("{}_initializers", key.as_str())),
          extra_initializers: ctx.names.generate(&format!("{}_extraInitializers", key.as_str())),
        };
        inits.push(FieldInit::Decorated {
          loc,
          key: key.clone(),
          value: field.stx.value.take(),
          initializers: field_temps.initializers.clone(),
          extra_initializers: field_temps.extra_initializers.clone(),
        });
        plans.push(Plan::Field {
          loc,
          key,
          decorators,
          temps: field_temps,
        });
      }
      ClassMember::Accessor(mut accessor) => {
        reject_param_decorators(ctx, &mut accessor.stx.func);
        let decorators = decorator_exprs(take(&mut accessor.stx.decorators));
        if !decorators.is_empty() {
          if let Some(key) = ctx.property_key(&accessor.stx.key) {
            plans.push(Plan::Method {
              loc,
              key,
              static_: accessor.stx.static_,
              kind: match accessor.stx.kind {
                AccessorKind::Getter => MethodKind::Getter,
                AccessorKind::Setter => MethodKind::Setter,
              },
              decorators,
            });
          };
        };
        members.push(ClassMember::Accessor(accessor));
      }
      ClassMember::Method(mut method) => {
        reject_param_decorators(ctx, &mut method.stx.func);
        let decorators = decorator_exprs(take(&mut method.stx.decorators));
        if !decorators.is_empty() {
          if let Some(key) = ctx.property_key(&method.stx.key) {
            plans.push(Plan::Method {
              loc,
              key,
              static_: method.stx.static_,
              kind: MethodKind::Method,
              decorators,
            });
          };
        };
        members.push(ClassMember::Method(method));
      }
      ClassMember::StaticBlock(block) => members.push(ClassMember::StaticBlock(block)),
    };
  }
  unit.members = members;

  for plan in &plans {
    if let Plan::Field { temps: t, .. } = plan {
      temps.push((t.decorators.clone(), None));
      temps.push((t.initializers.clone(), Some(build::array(loc, Vec::new()))));
      temps.push((t.extra_initializers.clone(), Some(build::array(loc, Vec::new()))));
    };
  }
  let mut extra_temp = |static_: bool, hint: &str| {
    plans
      .iter()
      .any(|p| matches!(p, Plan::Method { static_: s, .. } if *s == static_))
      .then(|| {
        let name = ctx.names.generate(hint);
        temps.push((name.clone(), Some(build::array(loc, Vec::new()))));
        name
      })
  };
  let instance_extra = extra_temp(false, "instanceExtraInitializers");
  let static_extra = extra_temp(true, "staticExtraInitializers");

  let mut lowering = Lowering {
    ctx,
    es_decorate_helper,
    run_initializers_helper,
    metadata,
  };
  let mut block = Vec::new();
  if let Some(t) = &class_temps {
    block.push(build::expr_stmt(
      loc,
      build::assign(loc, build::id(loc, &t.this), build::this(loc)),
    ));
  };
  if lowering.ctx.options.metadata == MetadataMode::Enabled {
    if let Some(metadata) = &lowering.metadata {
      block.push(build::var_decl(loc, VarDeclMode::Const, vec![(
        metadata.clone(),
        Some(lowering.create_metadata(loc, super_temp.as_deref())),
      )]));
    };
  };

  let (static_plans, instance_plans): (Vec<Plan>, Vec<Plan>) = plans.into_iter().partition(Plan::is_static);
  for plan in static_plans.into_iter().chain(instance_plans) {
    match plan {
      Plan::Field {
        loc,
        key,
        decorators,
        temps: t,
      } => {
        block.push(build::expr_stmt(
          loc,
          build::assign(loc, build::id(loc, &t.decorators), build::array(loc, decorators)),
        ));
        let context = lowering.member_context(loc, "field", &key, false, access_object(loc, &key, true, true));
        block.push(lowering.es_decorate(loc, vec![
          build::null(loc),
          build::null(loc),
          build::id(loc, &t.decorators),
          context,
          build::id(loc, &t.initializers),
          build::id(loc, &t.extra_initializers),
        ]));
      }
      Plan::Method {
        loc,
        key,
        static_,
        kind,
        decorators,
      } => {
        let (get, set) = match kind {
          MethodKind::Setter => (false, true),
          MethodKind::Method | MethodKind::Getter => (true, false),
        };
        let context = lowering.member_context(loc, kind.as_str(), &key, static_, access_object(loc, &key, get, set));
        let extra = if static_ { &static_extra } else { &instance_extra };
        let extra = match extra {
          Some(extra) => build::id(loc, extra),
          None => build::null(loc),
        };
        block.push(lowering.es_decorate(loc, vec![
          build::this(loc),
          build::null(loc),
          build::array(loc, decorators),
          context,
          build::null(loc),
          extra,
        ]));
      }
    };
  }

  if let Some(t) = &class_temps {
    let context = lowering.with_metadata(loc, vec![
      ("kind", build::string(loc, "class")),
      ("name", build::id(loc, &class_name)),
    ]);
    block.push(lowering.es_decorate(loc, vec![
      build::null(loc),
      build::assign(
        loc,
        build::id(loc, &t.descriptor),
        build::object(loc, vec![("value", build::id(loc, &t.this))]),
      ),
      build::id(loc, &t.decorators),
      context,
      build::null(loc),
      build::id(loc, &t.extra_initializers),
    ]));
    block.push(build::expr_stmt(
      loc,
      build::assign(
        loc,
        build::id(loc, &t.this),
        build::member(loc, build::id(loc, &t.descriptor), "value"),
      ),
    ));
  };
  if lowering.ctx.options.metadata == MetadataMode::Enabled {
    if let Some(metadata) = &lowering.metadata {
      let target = match &class_temps {
        Some(t) => build::id(loc, &t.this),
        None => build::this(loc),
      };
      block.push(lowering.install_metadata(loc, target, metadata));
    };
  };
  if let Some(extra) = &static_extra {
    block.push(build::expr_stmt(
      loc,
      lowering.run_initializers(loc, vec![build::this(loc), build::id(loc, extra)]),
    ));
  };
  if let Some(t) = &class_temps {
    block.push(build::expr_stmt(
      loc,
      lowering.run_initializers(loc, vec![build::id(loc, &t.this), build::id(loc, &t.extra_initializers)]),
    ));
  };

  let mut constructor_stmts = Vec::new();
  if let Some(extra) = &instance_extra {
    constructor_stmts.push(build::expr_stmt(
      loc,
      lowering.run_initializers(loc, vec![build::this(loc), build::id(loc, extra)]),
    ));
  };
  for init in inits {
    match init {
      FieldInit::Decorated {
        loc,
        key,
        value,
        initializers,
        extra_initializers,
      } => {
        let initial = lowering.run_initializers(loc, vec![
          build::this(loc),
          build::id(loc, &initializers),
          value.unwrap_or_else(|| build::void_zero(loc)),
        ]);
        constructor_stmts.push(lowering.install_field(loc, &FieldKey::Property(key), initial));
        constructor_stmts.push(build::expr_stmt(
          loc,
          lowering.run_initializers(loc, vec![build::this(loc), build::id(loc, &extra_initializers)]),
        ));
      }
      FieldInit::Plain { loc, key, value } => {
        let value = match value {
          Some(value) => value,
          // Assignment semantics leave uninitialized fields undeclared.
          None if !lowering.ctx.options.use_define_for_class_fields => continue,
          None => build::void_zero(loc),
        };
        constructor_stmts.push(lowering.install_field(loc, &key, value));
      }
    };
  }

  let mut constructor_at = 0;
  if !block.is_empty() {
    unit.members.insert(0, build::static_block(loc, block));
    constructor_at = 1;
  };
  if !constructor_stmts.is_empty() {
    let derived = unit.extends.is_some();
    if let Err(constructor_loc) =
      splice_into_constructor(&mut unit.members, constructor_at, derived, loc, constructor_stmts)
    {
      let file = lowering.ctx.file;
      lowering.ctx.report(err::missing_super_call(file, constructor_loc));
    };
  };

  Stage3Output {
    temps: build::var_decl(loc, VarDeclMode::Let, temps),
    class_this: class_temps.map(|t| t.this),
  }
}
