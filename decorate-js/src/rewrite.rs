//! Replaces decorated class declarations with their lowered statements, wherever a statement list can hold them.

use crate::build;
use crate::detect::detect;
use crate::err;
use crate::legacy;
use crate::options::EmissionOrder;
use crate::stage3;
use crate::unit::ClassUnit;
use crate::unit::ExportKind;
use crate::unit::UnitContext;
use derive_visitor::VisitorMut;
use parse_js::ast::class_or_object::ClassStaticBlock;
use parse_js::ast::expr::ClassExpr;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ClassDecl;
use parse_js::ast::stmt::BlockStmt;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use tracing::debug;

type TopLevelNode = Node<TopLevel>;
type BlockStmtNode = Node<BlockStmt>;
type ClassStaticBlockNode = Node<ClassStaticBlock>;
type ClassExprNode = Node<ClassExpr>;

#[derive(VisitorMut)]
#[visitor(
  TopLevelNode(exit),
  BlockStmtNode(exit),
  FuncBody(exit),
  ClassStaticBlockNode(exit),
  ClassExprNode(enter)
)]
pub(crate) struct DeclarationRewriter<'a> {
  pub ctx: &'a mut UnitContext,
}

impl DeclarationRewriter<'_> {
  fn exit_top_level_node(&mut self, node: &mut TopLevelNode) {
    rewrite_stmts(self.ctx, &mut node.stx.body);
  }

  fn exit_block_stmt_node(&mut self, node: &mut BlockStmtNode) {
    rewrite_stmts(self.ctx, &mut node.stx.body);
  }

  fn exit_func_body(&mut self, body: &mut FuncBody) {
    if let FuncBody::Block(stmts) = body {
      rewrite_stmts(self.ctx, stmts);
    };
  }

  fn exit_class_static_block_node(&mut self, node: &mut ClassStaticBlockNode) {
    rewrite_stmts(self.ctx, &mut node.stx.body);
  }

  fn enter_class_expr_node(&mut self, node: &mut ClassExprNode) {
    if detect(&node.stx.decorators, &node.stx.members).any() {
      let loc = node.stx.decorators.first().map_or(node.loc, |d| d.loc);
      let file = self.ctx.file;
      self.ctx.report(err::class_expression_decorator(file, loc));
    };
  }
}

fn rewrite_stmts(ctx: &mut UnitContext, stmts: &mut Vec<Node<Stmt>>) {
  if !stmts
    .iter()
    .any(|stmt| matches!(stmt.stx.as_ref(), Stmt::ClassDecl(_)))
  {
    return;
  };
  for stmt in std::mem::take(stmts) {
    let loc = stmt.loc;
    match *stmt.stx {
      Stmt::ClassDecl(decl) => lower_class_decl(ctx, decl, stmts),
      other => stmts.push(Node::new(loc, other)),
    };
  }
}

fn lower_class_decl(ctx: &mut UnitContext, decl: Node<ClassDecl>, out: &mut Vec<Node<Stmt>>) {
  let presence = detect(&decl.stx.decorators, &decl.stx.members);
  if !presence.any() {
    out.push(decl.into_wrapped());
    return;
  };
  if decl.stx.name.is_none() && !decl.stx.export_default {
    ctx.report(err::missing_class_name(ctx.file, decl.loc));
    out.push(decl.into_wrapped());
    return;
  };

  let loc = decl.loc;
  let ClassDecl {
    decorators,
    export,
    export_default,
    name,
    extends,
    members,
  } = *decl.stx;
  let export = match (export, export_default) {
    (_, true) => ExportKind::Default,
    (true, false) => ExportKind::Named,
    (false, false) => ExportKind::None,
  };
  let (binding, display_name) = match &name {
    Some(name) => (name.stx.name.clone(), name.stx.name.clone()),
    None => (ctx.names.generate("default"), "default".to_string()),
  };
  let mut unit = ClassUnit {
    loc,
    binding,
    display_name,
    name,
    export,
    decorators,
    extends,
    members,
    presence,
  };
  debug!(
    class = unit.binding.as_str(),
    pipeline = ?ctx.pipeline,
    presence = ?unit.presence,
    "lowering decorated class"
  );

  if ctx.pipeline.is_legacy() {
    let lowered = legacy::lower(ctx, &mut unit);
    let before = ctx.options.emission_order == EmissionOrder::BeforeDeclaration;
    let (before_calls, after_calls) = if before {
      (lowered.member_calls, Vec::new())
    } else {
      (Vec::new(), lowered.member_calls)
    };
    out.extend(before_calls);
    let binding = unit.binding.clone();
    let export = unit.export;
    if export == ExportKind::None {
      // Plain declarations keep their form; class bindings can be reassigned by the class call.
      out.push(
        Node::new(loc, ClassDecl {
          decorators: Vec::new(),
          export: false,
          export_default: false,
          name: unit.name,
          extends: unit.extends,
          members: unit.members,
        })
        .into_wrapped(),
      );
    } else {
      let class = build::class_expr(loc, unit.name, unit.extends, unit.members);
      out.push(build::let_decl(loc, &binding, class));
    };
    out.extend(after_calls);
    out.extend(lowered.class_call);
    out.extend(export_stmt(loc, export, &binding));
  } else {
    let lowered = stage3::lower(ctx, &mut unit);
    out.push(lowered.temps);
    let binding = unit.binding.clone();
    let export = unit.export;
    let class = build::class_expr(loc, unit.name, unit.extends, unit.members);
    out.push(build::let_decl(loc, &binding, class));
    if let Some(class_this) = lowered.class_this {
      out.push(build::expr_stmt(
        loc,
        build::assign(loc, build::id(loc, &binding), build::id(loc, &class_this)),
      ));
    };
    out.extend(export_stmt(loc, export, &binding));
  };
}

fn export_stmt(loc: Loc, export: ExportKind, binding: &str) -> Option<Node<Stmt>> {
  match export {
    ExportKind::None => None,
    ExportKind::Named => Some(build::export_named(loc, binding)),
    ExportKind::Default => Some(build::export_default(loc, binding)),
  }
}
