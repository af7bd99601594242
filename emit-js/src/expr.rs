use parse_js::ast::class_or_object::AccessorKind;
use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::class_or_object::ObjMemberType;
use parse_js::ast::expr::lit::LitArrElem;
use parse_js::ast::expr::lit::LitArrExpr;
use parse_js::ast::expr::lit::LitObjExpr;
use parse_js::ast::expr::pat::ClassOrFuncName;
use parse_js::ast::expr::ArrowFuncExpr;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CallArg;
use parse_js::ast::expr::CallExpr;
use parse_js::ast::expr::ComputedMemberExpr;
use parse_js::ast::expr::CondExpr;
use parse_js::ast::expr::Decorator;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::MemberExpr;
use parse_js::ast::expr::NewExpr;
use parse_js::ast::expr::UnaryExpr;
use parse_js::ast::expr::UnaryPostfixExpr;
use parse_js::ast::func::Func;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::expr::pat::Pat;
use parse_js::char::is_valid_identifier;
use parse_js::lex::number_to_js_string;
use parse_js::operator::OperatorName;
use parse_js::operator::OPERATORS;
use parse_js::token::TT;

use crate::emitter::with_node_context;
use crate::emitter::EmitError;
use crate::emitter::EmitResult;
use crate::pat::emit_param_decls;
use crate::precedence::child_min_prec_for_binary;
use crate::precedence::expr_prec;
use crate::precedence::leftmost;
use crate::precedence::mixes_nullish_with_logical;
use crate::precedence::needs_parens;
use crate::precedence::new_callee_needs_parens;
use crate::precedence::Prec;
use crate::precedence::Side;
use crate::precedence::ASSIGNMENT_PRECEDENCE;
use crate::precedence::CALL_MEMBER_PRECEDENCE;
use crate::precedence::COMMA_PRECEDENCE;
use crate::precedence::CONDITIONAL_PRECEDENCE;
use crate::precedence::POSTFIX_PRECEDENCE;
use crate::precedence::UNARY_PRECEDENCE;
use crate::stmt::emit_block_body;
use crate::Emitter;

pub fn emit_expr(out: &mut Emitter, expr: &Node<Expr>) -> EmitResult {
  JsExprEmitter { out }.emit_expr_with_min_prec(expr, COMMA_PRECEDENCE)
}

pub fn emit_expr_with_min_prec(out: &mut Emitter, expr: &Node<Expr>, min_prec: Prec) -> EmitResult {
  JsExprEmitter { out }.emit_expr_with_min_prec(expr, min_prec)
}

/// Emits `expr` at assignment precedence, as used by initializers, arguments and array elements.
pub fn emit_assignment_expr(out: &mut Emitter, expr: &Node<Expr>) -> EmitResult {
  emit_expr_with_min_prec(out, expr, ASSIGNMENT_PRECEDENCE)
}

/// Emits an expression in a position where a leading `{`, `function` or `class` would be read as a statement or declaration.
pub fn emit_expr_at_stmt_start(out: &mut Emitter, expr: &Node<Expr>, min_prec: Prec) -> EmitResult {
  let hazard = matches!(
    leftmost(expr).stx.as_ref(),
    Expr::LitObj(_) | Expr::Func(_) | Expr::Class(_)
  );
  if hazard {
    out.write_punct("(");
    emit_expr(out, expr)?;
    out.write_punct(")");
    Ok(())
  } else {
    emit_expr_with_min_prec(out, expr, min_prec)
  }
}

pub fn emit_identifier(out: &mut Emitter, name: &str) -> EmitResult {
  if !is_valid_identifier(name) {
    return Err(EmitError::invalid_identifier(name));
  };
  out.write_identifier(name);
  Ok(())
}

pub fn emit_decorators(out: &mut Emitter, decorators: &[Node<Decorator>]) -> EmitResult {
  for decorator in decorators {
    with_node_context(decorator.loc, || {
      out.write_punct("@");
      let expr = &decorator.stx.expression;
      if is_decorator_member_expr(expr) || is_decorator_call_expr(expr) {
        emit_expr_with_min_prec(out, expr, CALL_MEMBER_PRECEDENCE)
      } else {
        out.write_punct("(");
        emit_expr(out, expr)?;
        out.write_punct(")");
        Ok(())
      }
    })?;
  }
  Ok(())
}

fn is_decorator_member_expr(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Id(_) => true,
    Expr::Member(member) => {
      !member.stx.optional_chaining && is_decorator_member_expr(&member.stx.left)
    }
    _ => false,
  }
}

fn is_decorator_call_expr(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Call(call) => !call.stx.optional_chaining && is_decorator_member_expr(&call.stx.callee),
    _ => false,
  }
}

pub fn emit_class_or_obj_key(out: &mut Emitter, key: &ClassOrObjKey) -> EmitResult {
  match key {
    ClassOrObjKey::Direct(direct) => with_node_context(direct.loc, || {
      let name = &direct.stx.key;
      match direct.stx.tt {
        TT::LiteralString => out.write_string_literal(name),
        TT::LiteralNumber => out.write_number(name),
        TT::PrivateMember => match name.strip_prefix('#') {
          Some(rest) if is_valid_identifier(rest) => out.write_identifier(name),
          _ => return Err(EmitError::invalid_identifier(name)),
        },
        _ if is_valid_identifier(name) => out.write_identifier(name),
        _ => out.write_string_literal(name),
      };
      Ok(())
    }),
    ClassOrObjKey::Computed(expr) => {
      out.write_punct("[");
      emit_assignment_expr(out, expr)?;
      out.write_punct("]");
      Ok(())
    }
  }
}

/// Parameters and body of a non-arrow function or method.
pub fn emit_func_params_and_body(out: &mut Emitter, func: &Node<Func>) -> EmitResult {
  with_node_context(func.loc, || {
    emit_param_decls(out, &func.stx.parameters)?;
    match &func.stx.body {
      FuncBody::Block(body) => emit_block_body(out, body),
      FuncBody::Expression(_) => Err(EmitError::unsupported("expression body on a non-arrow function")),
    }
  })
}

pub fn emit_class(
  out: &mut Emitter,
  decorators: &[Node<Decorator>],
  name: Option<&Node<ClassOrFuncName>>,
  extends: Option<&Node<Expr>>,
  members: &[ClassMember],
) -> EmitResult {
  emit_decorators(out, decorators)?;
  out.write_keyword("class");
  if let Some(name) = name {
    emit_identifier(out, &name.stx.name).map_err(|e| e.with_loc(name.loc))?;
  };
  if let Some(extends) = extends {
    out.write_keyword("extends");
    emit_expr_with_min_prec(out, extends, CALL_MEMBER_PRECEDENCE)?;
  };
  out.write_punct("{");
  out.indent();
  for member in members {
    out.line_break();
    emit_class_member(out, member)?;
  }
  out.dedent();
  if !members.is_empty() {
    out.line_break();
  };
  out.write_punct("}");
  Ok(())
}

fn emit_class_member(out: &mut Emitter, member: &ClassMember) -> EmitResult {
  match member {
    ClassMember::Field(field) => with_node_context(field.loc, || {
      emit_decorators(out, &field.stx.decorators)?;
      if field.stx.static_ {
        out.write_keyword("static");
      };
      if field.stx.accessor {
        out.write_keyword("accessor");
      };
      emit_class_or_obj_key(out, &field.stx.key)?;
      if let Some(value) = &field.stx.value {
        out.write_punct("=");
        emit_assignment_expr(out, value)?;
      };
      out.write_punct(";");
      Ok(())
    }),
    ClassMember::Accessor(accessor) => with_node_context(accessor.loc, || {
      emit_decorators(out, &accessor.stx.decorators)?;
      if accessor.stx.static_ {
        out.write_keyword("static");
      };
      out.write_keyword(match accessor.stx.kind {
        AccessorKind::Getter => "get",
        AccessorKind::Setter => "set",
      });
      emit_class_or_obj_key(out, &accessor.stx.key)?;
      emit_func_params_and_body(out, &accessor.stx.func)
    }),
    ClassMember::Method(method) => with_node_context(method.loc, || {
      emit_decorators(out, &method.stx.decorators)?;
      if method.stx.static_ {
        out.write_keyword("static");
      };
      emit_method_prefix(out, &method.stx.func);
      emit_class_or_obj_key(out, &method.stx.key)?;
      emit_func_params_and_body(out, &method.stx.func)
    }),
    ClassMember::StaticBlock(block) => with_node_context(block.loc, || {
      out.write_keyword("static");
      emit_block_body(out, &block.stx.body)
    }),
  }
}

fn emit_method_prefix(out: &mut Emitter, func: &Node<Func>) {
  if func.stx.async_ {
    out.write_keyword("async");
  };
  if func.stx.generator {
    out.write_punct("*");
  };
}

struct JsExprEmitter<'a> {
  out: &'a mut Emitter,
}

impl<'a> JsExprEmitter<'a> {
  fn emit_expr_with_min_prec(&mut self, expr: &Node<Expr>, min_prec: Prec) -> EmitResult {
    with_node_context(expr.loc, || {
      let wrap = needs_parens(expr_prec(expr), min_prec);
      if wrap {
        self.out.write_punct("(");
      };
      self.emit_expr_no_parens(expr)?;
      if wrap {
        self.out.write_punct(")");
      };
      Ok(())
    })
  }

  fn emit_child(&mut self, expr: &Node<Expr>, min_prec: Prec) -> EmitResult {
    self.emit_expr_with_min_prec(expr, min_prec)
  }

  fn emit_forced_parens(&mut self, expr: &Node<Expr>) -> EmitResult {
    self.out.write_punct("(");
    self.emit_child(expr, COMMA_PRECEDENCE)?;
    self.out.write_punct(")");
    Ok(())
  }

  fn emit_expr_no_parens(&mut self, expr: &Node<Expr>) -> EmitResult {
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => self.emit_arrow_func(arrow),
      Expr::Binary(binary) => self.emit_binary(binary),
      Expr::Call(call) => self.emit_call(call),
      Expr::Class(class) => emit_class(
        self.out,
        &class.stx.decorators,
        class.stx.name.as_ref(),
        class.stx.extends.as_ref(),
        &class.stx.members,
      ),
      Expr::ComputedMember(member) => self.emit_computed_member(member),
      Expr::Cond(cond) => self.emit_cond(cond),
      Expr::Func(func) => {
        if func.stx.func.stx.async_ {
          self.out.write_keyword("async");
        };
        self.out.write_keyword("function");
        if func.stx.func.stx.generator {
          self.out.write_punct("*");
        };
        if let Some(name) = &func.stx.name {
          emit_identifier(self.out, &name.stx.name)?;
        };
        emit_func_params_and_body(self.out, &func.stx.func)
      }
      Expr::Id(id) => emit_identifier(self.out, &id.stx.name),
      Expr::Member(member) => self.emit_member(member),
      Expr::New(new) => self.emit_new(new),
      Expr::Super(_) => {
        self.out.write_keyword("super");
        Ok(())
      }
      Expr::This(_) => {
        self.out.write_keyword("this");
        Ok(())
      }
      Expr::Unary(unary) => self.emit_unary(unary),
      Expr::UnaryPostfix(unary) => self.emit_unary_postfix(unary),
      Expr::LitArr(arr) => self.emit_lit_arr(arr),
      Expr::LitBool(lit) => {
        self.out.write_keyword(if lit.stx.value { "true" } else { "false" });
        Ok(())
      }
      Expr::LitNull(_) => {
        self.out.write_keyword("null");
        Ok(())
      }
      Expr::LitNum(lit) => {
        self.out.write_number(&number_to_js_string(lit.stx.value));
        Ok(())
      }
      Expr::LitObj(obj) => self.emit_lit_obj(obj),
      Expr::LitStr(lit) => {
        self.out.write_string_literal(&lit.stx.value);
        Ok(())
      }
    }
  }

  fn emit_operator_text(&mut self, text: &str) {
    if text.bytes().all(|c| c.is_ascii_alphabetic()) {
      self.out.write_keyword(text);
    } else {
      self.out.write_punct(text);
    }
  }

  fn emit_binary(&mut self, binary: &Node<BinaryExpr>) -> EmitResult {
    let op = binary.stx.operator;
    let mut left_min = child_min_prec_for_binary(op, Side::Left);
    if op == OperatorName::Exponentiation {
      // `-a ** b` is a syntax error; the base must be an update expression or tighter.
      left_min = left_min.max(POSTFIX_PRECEDENCE);
    };
    let right_min = child_min_prec_for_binary(op, Side::Right);

    if mixes_nullish_with_logical(op, &binary.stx.left) {
      self.emit_forced_parens(&binary.stx.left)?;
    } else {
      self.emit_child(&binary.stx.left, left_min)?;
    };
    let text = OPERATORS
      .get(&op)
      .map(|o| o.text)
      .ok_or_else(|| EmitError::unsupported("unknown binary operator"))?;
    self.emit_operator_text(text);
    if mixes_nullish_with_logical(op, &binary.stx.right) {
      self.emit_forced_parens(&binary.stx.right)
    } else {
      self.emit_child(&binary.stx.right, right_min)
    }
  }

  fn emit_cond(&mut self, cond: &Node<CondExpr>) -> EmitResult {
    self.emit_child(&cond.stx.test, CONDITIONAL_PRECEDENCE.tighter())?;
    self.out.write_punct("?");
    self.emit_child(&cond.stx.consequent, ASSIGNMENT_PRECEDENCE)?;
    self.out.write_punct(":");
    self.emit_child(&cond.stx.alternate, ASSIGNMENT_PRECEDENCE)
  }

  fn emit_unary(&mut self, unary: &Node<UnaryExpr>) -> EmitResult {
    let text = OPERATORS
      .get(&unary.stx.operator)
      .map(|o| o.text)
      .ok_or_else(|| EmitError::unsupported("unknown unary operator"))?;
    self.emit_operator_text(text);
    self.emit_child(&unary.stx.argument, UNARY_PRECEDENCE)
  }

  fn emit_unary_postfix(&mut self, unary: &Node<UnaryPostfixExpr>) -> EmitResult {
    self.emit_child(&unary.stx.argument, POSTFIX_PRECEDENCE.tighter())?;
    self.out.write_punct(match unary.stx.operator {
      OperatorName::PostfixDecrement => "--",
      _ => "++",
    });
    Ok(())
  }

  fn emit_member_object(&mut self, object: &Node<Expr>) -> EmitResult {
    // `1.x` would lex as a malformed number.
    if matches!(object.stx.as_ref(), Expr::LitNum(_)) {
      self.emit_forced_parens(object)
    } else {
      self.emit_child(object, CALL_MEMBER_PRECEDENCE)
    }
  }

  fn emit_member(&mut self, member: &Node<MemberExpr>) -> EmitResult {
    self.emit_member_object(&member.stx.left)?;
    self
      .out
      .write_punct(if member.stx.optional_chaining { "?." } else { "." });
    let name = &member.stx.right;
    let valid = match name.strip_prefix('#') {
      Some(rest) => is_valid_identifier(rest),
      None => is_valid_identifier(name),
    };
    if !valid {
      return Err(EmitError::invalid_identifier(name));
    };
    self.out.write_identifier(name);
    Ok(())
  }

  fn emit_computed_member(&mut self, member: &Node<ComputedMemberExpr>) -> EmitResult {
    self.emit_member_object(&member.stx.object)?;
    if member.stx.optional_chaining {
      self.out.write_punct("?.");
    };
    self.out.write_punct("[");
    self.emit_child(&member.stx.member, COMMA_PRECEDENCE)?;
    self.out.write_punct("]");
    Ok(())
  }

  fn emit_call_args(&mut self, args: &[Node<CallArg>]) -> EmitResult {
    self.out.write_punct("(");
    for (i, arg) in args.iter().enumerate() {
      if i > 0 {
        self.out.write_punct(",");
      };
      if arg.stx.spread {
        self.out.write_punct("...");
      };
      self.emit_child(&arg.stx.value, ASSIGNMENT_PRECEDENCE)?;
    }
    self.out.write_punct(")");
    Ok(())
  }

  fn emit_call(&mut self, call: &Node<CallExpr>) -> EmitResult {
    self.emit_child(&call.stx.callee, CALL_MEMBER_PRECEDENCE)?;
    if call.stx.optional_chaining {
      self.out.write_punct("?.");
    };
    self.emit_call_args(&call.stx.arguments)
  }

  fn emit_new(&mut self, new: &Node<NewExpr>) -> EmitResult {
    self.out.write_keyword("new");
    if new_callee_needs_parens(&new.stx.callee) {
      self.emit_forced_parens(&new.stx.callee)?;
    } else {
      self.emit_child(&new.stx.callee, CALL_MEMBER_PRECEDENCE)?;
    };
    self.emit_call_args(&new.stx.arguments)
  }

  fn emit_arrow_func(&mut self, arrow: &Node<ArrowFuncExpr>) -> EmitResult {
    let func = &arrow.stx.func;
    if func.stx.async_ {
      self.out.write_keyword("async");
    };
    let params = &func.stx.parameters;
    let single_plain_param = match params.as_slice() {
      [param] => {
        !param.stx.rest
          && param.stx.default_value.is_none()
          && param.stx.decorators.is_empty()
          && matches!(param.stx.pattern.stx.pat.stx.as_ref(), Pat::Id(_))
      }
      _ => false,
    };
    match (&params[..], single_plain_param) {
      ([param], true) => match param.stx.pattern.stx.pat.stx.as_ref() {
        Pat::Id(id) => emit_identifier(self.out, &id.stx.name)?,
        _ => emit_param_decls(self.out, params)?,
      },
      _ => emit_param_decls(self.out, params)?,
    };
    self.out.write_punct("=>");
    match &func.stx.body {
      FuncBody::Block(body) => emit_block_body(self.out, body),
      FuncBody::Expression(body) => {
        if matches!(leftmost(body).stx.as_ref(), Expr::LitObj(_)) {
          self.emit_forced_parens(body)
        } else {
          self.emit_child(body, ASSIGNMENT_PRECEDENCE)
        }
      }
    }
  }

  fn emit_lit_arr(&mut self, arr: &Node<LitArrExpr>) -> EmitResult {
    self.out.write_punct("[");
    let elements = &arr.stx.elements;
    for (i, element) in elements.iter().enumerate() {
      if i > 0 {
        self.out.write_punct(",");
      };
      match element {
        LitArrElem::Single(value) => self.emit_child(value, ASSIGNMENT_PRECEDENCE)?,
        LitArrElem::Rest(value) => {
          self.out.write_punct("...");
          self.emit_child(value, ASSIGNMENT_PRECEDENCE)?;
        }
        LitArrElem::Empty => {}
      };
    }
    // A trailing hole needs its own comma, as the final comma is otherwise dropped.
    if matches!(elements.last(), Some(LitArrElem::Empty)) {
      self.out.write_punct(",");
    };
    self.out.write_punct("]");
    Ok(())
  }

  fn emit_lit_obj(&mut self, obj: &Node<LitObjExpr>) -> EmitResult {
    self.out.write_punct("{");
    for (i, member) in obj.stx.members.iter().enumerate() {
      if i > 0 {
        self.out.write_punct(",");
      };
      with_node_context(member.loc, || match &member.stx.typ {
        ObjMemberType::Valued { key, val } => {
          emit_class_or_obj_key(self.out, key)?;
          self.out.write_punct(":");
          self.emit_child(val, ASSIGNMENT_PRECEDENCE)
        }
        ObjMemberType::Method {
          key,
          accessor,
          func,
        } => {
          match accessor {
            Some(AccessorKind::Getter) => self.out.write_keyword("get"),
            Some(AccessorKind::Setter) => self.out.write_keyword("set"),
            None => emit_method_prefix(self.out, func),
          };
          emit_class_or_obj_key(self.out, key)?;
          emit_func_params_and_body(self.out, func)
        }
        ObjMemberType::Shorthand { id } => emit_identifier(self.out, &id.stx.name),
        ObjMemberType::Rest { val } => {
          self.out.write_punct("...");
          self.emit_child(val, ASSIGNMENT_PRECEDENCE)
        }
      })?;
    }
    self.out.write_punct("}");
    Ok(())
  }
}
