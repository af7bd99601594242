mod emitter;
mod escape;
mod expr;
mod pat;
mod precedence;
mod stmt;

use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;

pub use emitter::EmitError;
pub use emitter::EmitErrorKind;
pub use emitter::EmitMode;
pub use emitter::EmitOptions;
pub use emitter::EmitResult;
pub use emitter::Emitter;

/// Prints a whole program.
pub fn emit_top_level(top: &Node<TopLevel>, opts: EmitOptions) -> EmitResult<String> {
  let mut out = Emitter::new(opts);
  stmt::emit_top_level(&mut out, top)?;
  Ok(out.into_string())
}

pub fn emit_stmt(stmt: &Node<Stmt>, opts: EmitOptions) -> EmitResult<String> {
  let mut out = Emitter::new(opts);
  stmt::emit_stmt(&mut out, stmt)?;
  Ok(out.into_string())
}

pub fn emit_expr(expr: &Node<Expr>, opts: EmitOptions) -> EmitResult<String> {
  let mut out = Emitter::new(opts);
  expr::emit_expr(&mut out, expr)?;
  Ok(out.into_string())
}
