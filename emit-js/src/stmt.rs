use parse_js::ast::expr::Expr;
use parse_js::ast::import_export::ExportNames;
use parse_js::ast::import_export::ImportNames;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ClassDecl;
use parse_js::ast::stmt::decl::FuncDecl;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::ExportListStmt;
use parse_js::ast::stmt::ForInit;
use parse_js::ast::stmt::ForStmt;
use parse_js::ast::stmt::IfStmt;
use parse_js::ast::stmt::ImportStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use parse_js::char::is_valid_identifier;
use parse_js::operator::OperatorName;

use crate::emitter::with_node_context;
use crate::emitter::EmitResult;
use crate::expr::emit_assignment_expr;
use crate::expr::emit_class;
use crate::expr::emit_expr;
use crate::expr::emit_expr_at_stmt_start;
use crate::expr::emit_func_params_and_body;
use crate::expr::emit_identifier;
use crate::pat::emit_pat;
use crate::pat::emit_pat_decl;
use crate::precedence::ASSIGNMENT_PRECEDENCE;
use crate::precedence::COMMA_PRECEDENCE;
use crate::Emitter;

pub fn emit_top_level(out: &mut Emitter, top: &Node<TopLevel>) -> EmitResult {
  for (i, stmt) in top.stx.body.iter().enumerate() {
    if i > 0 {
      out.line_break();
    };
    emit_stmt(out, stmt)?;
  }
  Ok(())
}

/// A braced statement list, as used by blocks, function bodies and static blocks.
pub fn emit_block_body(out: &mut Emitter, body: &[Node<Stmt>]) -> EmitResult {
  out.write_punct("{");
  out.indent();
  for stmt in body {
    out.line_break();
    emit_stmt(out, stmt)?;
  }
  out.dedent();
  if !body.is_empty() {
    out.line_break();
  };
  out.write_punct("}");
  Ok(())
}

pub fn emit_stmt(out: &mut Emitter, stmt: &Node<Stmt>) -> EmitResult {
  with_node_context(stmt.loc, || match stmt.stx.as_ref() {
    Stmt::Block(block) => emit_block_body(out, &block.stx.body),
    Stmt::Break(brk) => {
      out.write_keyword("break");
      if let Some(label) = &brk.stx.label {
        emit_identifier(out, label)?;
      };
      out.write_punct(";");
      Ok(())
    }
    Stmt::Continue(cont) => {
      out.write_keyword("continue");
      if let Some(label) = &cont.stx.label {
        emit_identifier(out, label)?;
      };
      out.write_punct(";");
      Ok(())
    }
    Stmt::Empty(_) => {
      out.write_punct(";");
      Ok(())
    }
    Stmt::ExportDefaultExpr(export) => {
      out.write_keyword("export");
      out.write_keyword("default");
      emit_expr_at_stmt_start(out, &export.stx.expression, ASSIGNMENT_PRECEDENCE)?;
      out.write_punct(";");
      Ok(())
    }
    Stmt::ExportList(export) => emit_export_list(out, export),
    Stmt::Expr(expr) => {
      emit_expr_at_stmt_start(out, &expr.stx.expr, COMMA_PRECEDENCE)?;
      out.write_punct(";");
      Ok(())
    }
    Stmt::For(for_stmt) => emit_for(out, for_stmt),
    Stmt::If(if_stmt) => emit_if(out, if_stmt),
    Stmt::Import(import) => emit_import(out, import),
    Stmt::Return(ret) => {
      out.write_keyword("return");
      if let Some(value) = &ret.stx.value {
        emit_expr(out, value)?;
      };
      out.write_punct(";");
      Ok(())
    }
    Stmt::Throw(throw) => {
      out.write_keyword("throw");
      emit_expr(out, &throw.stx.value)?;
      out.write_punct(";");
      Ok(())
    }
    Stmt::While(while_stmt) => {
      out.write_keyword("while");
      out.write_punct("(");
      emit_expr(out, &while_stmt.stx.condition)?;
      out.write_punct(")");
      emit_stmt(out, &while_stmt.stx.body)
    }
    Stmt::ClassDecl(decl) => emit_class_decl(out, decl),
    Stmt::FunctionDecl(decl) => emit_func_decl(out, decl),
    Stmt::VarDecl(decl) => {
      emit_var_decl(out, decl, false)?;
      out.write_punct(";");
      Ok(())
    }
  })
}

fn emit_export_prefix(out: &mut Emitter, export: bool, export_default: bool) {
  if export || export_default {
    out.write_keyword("export");
  };
  if export_default {
    out.write_keyword("default");
  };
}

fn emit_class_decl(out: &mut Emitter, decl: &Node<ClassDecl>) -> EmitResult {
  emit_export_prefix(out, decl.stx.export, decl.stx.export_default);
  emit_class(
    out,
    &decl.stx.decorators,
    decl.stx.name.as_ref(),
    decl.stx.extends.as_ref(),
    &decl.stx.members,
  )
}

fn emit_func_decl(out: &mut Emitter, decl: &Node<FuncDecl>) -> EmitResult {
  emit_export_prefix(out, decl.stx.export, decl.stx.export_default);
  let func = &decl.stx.function;
  if func.stx.async_ {
    out.write_keyword("async");
  };
  out.write_keyword("function");
  if func.stx.generator {
    out.write_punct("*");
  };
  if let Some(name) = &decl.stx.name {
    emit_identifier(out, &name.stx.name)?;
  };
  emit_func_params_and_body(out, func)
}

fn is_in_expr(expr: &Node<Expr>) -> bool {
  matches!(expr.stx.as_ref(), Expr::Binary(binary) if binary.stx.operator == OperatorName::In)
}

/// Emits the declaration without its terminator. Inside a `for` header, `in` initializers are parenthesized so they cannot be read as a for-in loop.
fn emit_var_decl(out: &mut Emitter, decl: &Node<VarDecl>, for_init: bool) -> EmitResult {
  if decl.stx.export {
    out.write_keyword("export");
  };
  out.write_keyword(decl.stx.mode.as_str());
  for (i, declarator) in decl.stx.declarators.iter().enumerate() {
    if i > 0 {
      out.write_punct(",");
    };
    emit_pat_decl(out, &declarator.pattern)?;
    if let Some(initializer) = &declarator.initializer {
      out.write_punct("=");
      if for_init && is_in_expr(initializer) {
        out.write_punct("(");
        emit_expr(out, initializer)?;
        out.write_punct(")");
      } else {
        emit_assignment_expr(out, initializer)?;
      };
    };
  }
  Ok(())
}

fn emit_for(out: &mut Emitter, for_stmt: &Node<ForStmt>) -> EmitResult {
  out.write_keyword("for");
  out.write_punct("(");
  match &for_stmt.stx.init {
    ForInit::None => {}
    ForInit::Expr(expr) if is_in_expr(expr) => {
      out.write_punct("(");
      emit_expr(out, expr)?;
      out.write_punct(")");
    }
    ForInit::Expr(expr) => emit_expr_at_stmt_start(out, expr, COMMA_PRECEDENCE)?,
    ForInit::Decl(decl) => emit_var_decl(out, decl, true)?,
  };
  out.write_punct(";");
  if let Some(condition) = &for_stmt.stx.condition {
    emit_expr(out, condition)?;
  };
  out.write_punct(";");
  if let Some(post) = &for_stmt.stx.post {
    emit_expr(out, post)?;
  };
  out.write_punct(")");
  emit_stmt(out, &for_stmt.stx.body)
}

/// Whether an `else` following `stmt` would attach to an `if` nested inside it.
fn ends_with_open_if(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::If(if_stmt) => match &if_stmt.stx.alternate {
      None => true,
      Some(alternate) => ends_with_open_if(alternate),
    },
    Stmt::While(while_stmt) => ends_with_open_if(&while_stmt.stx.body),
    Stmt::For(for_stmt) => ends_with_open_if(&for_stmt.stx.body),
    _ => false,
  }
}

fn emit_if(out: &mut Emitter, if_stmt: &Node<IfStmt>) -> EmitResult {
  out.write_keyword("if");
  out.write_punct("(");
  emit_expr(out, &if_stmt.stx.test)?;
  out.write_punct(")");
  let consequent = &if_stmt.stx.consequent;
  match &if_stmt.stx.alternate {
    Some(alternate) => {
      if ends_with_open_if(consequent) {
        emit_block_body(out, std::slice::from_ref(consequent))?;
      } else {
        emit_stmt(out, consequent)?;
      };
      out.write_keyword("else");
      emit_stmt(out, alternate)
    }
    None => emit_stmt(out, consequent),
  }
}

/// Module export names may be arbitrary strings.
fn emit_module_export_name(out: &mut Emitter, name: &str) {
  if is_valid_identifier(name) {
    out.write_identifier(name);
  } else {
    out.write_string_literal(name);
  }
}

fn emit_import(out: &mut Emitter, import: &Node<ImportStmt>) -> EmitResult {
  out.write_keyword("import");
  let stx = &import.stx;
  if let Some(default) = &stx.default {
    emit_pat_decl(out, default)?;
    if stx.names.is_some() {
      out.write_punct(",");
    };
  };
  match &stx.names {
    None => {}
    Some(ImportNames::All(alias)) => {
      out.write_punct("*");
      out.write_keyword("as");
      emit_pat_decl(out, alias)?;
    }
    Some(ImportNames::Specific(names)) => {
      out.write_punct("{");
      for (i, name) in names.iter().enumerate() {
        if i > 0 {
          out.write_punct(",");
        };
        with_node_context(name.loc, || {
          let shorthand = match name.stx.alias.stx.pat.stx.as_ref() {
            parse_js::ast::expr::pat::Pat::Id(id) => id.stx.name == name.stx.importable,
            _ => false,
          };
          if shorthand {
            return emit_pat_decl(out, &name.stx.alias);
          };
          emit_module_export_name(out, &name.stx.importable);
          out.write_keyword("as");
          emit_pat(out, &name.stx.alias.stx.pat)
        })?;
      }
      out.write_punct("}");
    }
  };
  if stx.default.is_some() || stx.names.is_some() {
    out.write_keyword("from");
  };
  out.write_string_literal(&stx.module);
  out.write_punct(";");
  Ok(())
}

fn emit_export_list(out: &mut Emitter, export: &Node<ExportListStmt>) -> EmitResult {
  out.write_keyword("export");
  match &export.stx.names {
    ExportNames::All(alias) => {
      out.write_punct("*");
      if let Some(alias) = alias {
        out.write_keyword("as");
        emit_module_export_name(out, &alias.stx.name);
      };
    }
    ExportNames::Specific(names) => {
      out.write_punct("{");
      for (i, name) in names.iter().enumerate() {
        if i > 0 {
          out.write_punct(",");
        };
        emit_module_export_name(out, &name.stx.exportable);
        if name.stx.alias.stx.name != name.stx.exportable {
          out.write_keyword("as");
          emit_module_export_name(out, &name.stx.alias.stx.name);
        };
      }
      out.write_punct("}");
    }
  };
  if let Some(from) = &export.stx.from {
    out.write_keyword("from");
    out.write_string_literal(from);
  };
  out.write_punct(";");
  Ok(())
}
