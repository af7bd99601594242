use parse_js::ast::expr::pat::ArrPat;
use parse_js::ast::expr::pat::ObjPat;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ParamDecl;
use parse_js::ast::stmt::decl::PatDecl;

use crate::emitter::with_node_context;
use crate::emitter::EmitResult;
use crate::expr::emit_assignment_expr;
use crate::expr::emit_class_or_obj_key;
use crate::expr::emit_decorators;
use crate::expr::emit_identifier;
use crate::Emitter;

pub fn emit_pat_decl(out: &mut Emitter, decl: &Node<PatDecl>) -> EmitResult {
  emit_pat(out, &decl.stx.pat)
}

pub fn emit_pat(out: &mut Emitter, pat: &Node<Pat>) -> EmitResult {
  with_node_context(pat.loc, || match pat.stx.as_ref() {
    Pat::Id(id) => emit_identifier(out, &id.stx.name),
    Pat::Arr(arr) => emit_arr_pat(out, arr),
    Pat::Obj(obj) => emit_obj_pat(out, obj),
  })
}

fn emit_arr_pat(out: &mut Emitter, arr: &Node<ArrPat>) -> EmitResult {
  out.write_punct("[");
  let elements = &arr.stx.elements;
  for (i, element) in elements.iter().enumerate() {
    if i > 0 {
      out.write_punct(",");
    };
    if let Some(element) = element {
      emit_pat(out, &element.target)?;
      if let Some(default_value) = &element.default_value {
        out.write_punct("=");
        emit_assignment_expr(out, default_value)?;
      };
    };
  }
  match &arr.stx.rest {
    Some(rest) => {
      if !elements.is_empty() {
        out.write_punct(",");
      };
      out.write_punct("...");
      emit_pat(out, rest)?;
    }
    // `[a,,]` keeps its trailing hole only with an explicit extra comma.
    None if matches!(elements.last(), Some(None)) => out.write_punct(","),
    None => {}
  };
  out.write_punct("]");
  Ok(())
}

fn emit_obj_pat(out: &mut Emitter, obj: &Node<ObjPat>) -> EmitResult {
  out.write_punct("{");
  for (i, prop) in obj.stx.properties.iter().enumerate() {
    if i > 0 {
      out.write_punct(",");
    };
    with_node_context(prop.loc, || {
      if prop.stx.shorthand {
        emit_pat(out, &prop.stx.target)?;
      } else {
        emit_class_or_obj_key(out, &prop.stx.key)?;
        out.write_punct(":");
        emit_pat(out, &prop.stx.target)?;
      };
      if let Some(default_value) = &prop.stx.default_value {
        out.write_punct("=");
        emit_assignment_expr(out, default_value)?;
      };
      Ok(())
    })?;
  }
  if let Some(rest) = &obj.stx.rest {
    if !obj.stx.properties.is_empty() {
      out.write_punct(",");
    };
    out.write_punct("...");
    emit_identifier(out, &rest.stx.name)?;
  };
  out.write_punct("}");
  Ok(())
}

/// A parenthesized parameter list, including parameter decorators.
pub fn emit_param_decls(out: &mut Emitter, params: &[Node<ParamDecl>]) -> EmitResult {
  out.write_punct("(");
  for (i, param) in params.iter().enumerate() {
    if i > 0 {
      out.write_punct(",");
    };
    with_node_context(param.loc, || {
      emit_decorators(out, &param.stx.decorators)?;
      if param.stx.rest {
        out.write_punct("...");
      };
      emit_pat_decl(out, &param.stx.pattern)?;
      if let Some(default_value) = &param.stx.default_value {
        out.write_punct("=");
        emit_assignment_expr(out, default_value)?;
      };
      Ok(())
    })?;
  }
  out.write_punct(")");
  Ok(())
}
