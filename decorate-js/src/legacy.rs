//! Lowering to `__decorate`/`__param` calls, the shape TypeScript emits for `experimentalDecorators`.

use crate::build;
use crate::detect::DecoratorPresence;
use crate::helpers::Helper;
use crate::unit::member_loc;
use crate::unit::ClassUnit;
use crate::unit::UnitContext;
use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::expr::Decorator;
use parse_js::ast::expr::Expr;
use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::loc::Loc;
use std::mem::take;

pub(crate) struct LegacyOutput {
  /// One `__decorate(...)` call per decorated member, instance members first.
  pub member_calls: Vec<Node<Stmt>>,
  /// `X = __decorate([...], X)`, if the class or its constructor parameters are decorated.
  pub class_call: Option<Node<Stmt>>,
}

fn decorator_exprs(decorators: Vec<Node<Decorator>>) -> Vec<Node<Expr>> {
  decorators
    .into_iter()
    .map(|d| d.stx.expression)
    .collect()
}

/// Moves parameter decorators out of `func` as `__param(index, decorator)` entries.
fn param_decorators(ctx: &mut UnitContext, func: &mut Node<Func>, out: &mut Vec<Node<Expr>>) {
  for (index, param) in func.stx.parameters.iter_mut().enumerate() {
    for decorator in take(&mut param.stx.decorators) {
      let loc = decorator.loc;
      let helper = ctx.helper(Helper::Param);
      out.push(build::call_id(loc, &helper, vec![
        build::number(loc, index as f64),
        decorator.stx.expression,
      ]));
    }
  }
}

struct MemberCall<'m> {
  loc: Loc,
  key: &'m ClassOrObjKey,
  static_: bool,
  decorators: Vec<Node<Expr>>,
  // `void 0` for fields, `null` for methods and accessors.
  data: bool,
}

fn member_call(ctx: &mut UnitContext, binding: &str, call: MemberCall) -> Option<Node<Stmt>> {
  if call.decorators.is_empty() {
    return None;
  };
  let key = ctx.property_key(call.key)?;
  let loc = call.loc;
  let decorate = ctx.helper(Helper::Decorate);
  let target = if call.static_ {
    build::id(loc, binding)
  } else {
    build::member(loc, build::id(loc, binding), "prototype")
  };
  let descriptor = if call.data {
    build::void_zero(loc)
  } else {
    build::null(loc)
  };
  Some(build::expr_stmt(
    loc,
    build::call_id(loc, &decorate, vec![
      build::array(loc, call.decorators),
      target,
      build::string(loc, key.as_str()),
      descriptor,
    ]),
  ))
}

pub(crate) fn lower(ctx: &mut UnitContext, unit: &mut ClassUnit) -> LegacyOutput {
  ctx.helper(Helper::Decorate);
  if unit.presence == DecoratorPresence::DecoratorsWithParameters {
    ctx.helper(Helper::Param);
  };

  let mut member_calls = Vec::new();
  let mut constructor_params = Vec::new();
  for static_pass in [false, true] {
    for member in unit.members.iter_mut() {
      if member.is_static() != static_pass {
        continue;
      };
      let loc = member_loc(member);
      let call = match member {
        ClassMember::Field(field) => {
          let stx = field.stx.as_mut();
          MemberCall {
            loc,
            key: &stx.key,
            static_: stx.static_,
            decorators: decorator_exprs(take(&mut stx.decorators)),
            data: true,
          }
        }
        ClassMember::Accessor(accessor) => {
          let stx = accessor.stx.as_mut();
          let mut decorators = decorator_exprs(take(&mut stx.decorators));
          param_decorators(ctx, &mut stx.func, &mut decorators);
          MemberCall {
            loc,
            key: &stx.key,
            static_: stx.static_,
            decorators,
            data: false,
          }
        }
        ClassMember::Method(method) if method.stx.is_constructor() => {
          // Constructor parameter decorators apply to the class itself.
          param_decorators(ctx, &mut method.stx.func, &mut constructor_params);
          let stx = method.stx.as_mut();
          MemberCall {
            loc,
            key: &stx.key,
            static_: false,
            decorators: decorator_exprs(take(&mut stx.decorators)),
            data: false,
          }
        }
        ClassMember::Method(method) => {
          let stx = method.stx.as_mut();
          let mut decorators = decorator_exprs(take(&mut stx.decorators));
          param_decorators(ctx, &mut stx.func, &mut decorators);
          MemberCall {
            loc,
            key: &stx.key,
            static_: stx.static_,
            decorators,
            data: false,
          }
        }
        ClassMember::StaticBlock(_) => continue,
      };
      member_calls.extend(member_call(ctx, &unit.binding, call));
    }
  }

  let mut class_decorators = decorator_exprs(take(&mut unit.decorators));
  class_decorators.extend(constructor_params);
  let class_call = (!class_decorators.is_empty()).then(|| {
    let loc = unit.loc;
    let decorate = ctx.helper(Helper::Decorate);
    build::expr_stmt(
      loc,
      build::assign(
        loc,
        build::id(loc, &unit.binding),
        build::call_id(loc, &decorate, vec![
          build::array(loc, class_decorators),
          build::id(loc, &unit.binding),
        ]),
      ),
    )
  });

  LegacyOutput {
    member_calls,
    class_call,
  }
}
