use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

use super::expr::pat::IdPat;
use super::node::Node;
use super::stmt::decl::PatDecl;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportName {
  // For `import {a as b}`, this is `a`.
  #[drive(skip)]
  pub importable: String,
  // For `import {a as b}`, this is `b`.
  pub alias: Node<PatDecl>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ImportNames {
  // `import * as ns`.
  All(Node<PatDecl>),
  // `import {a as b, c, default as e}`.
  Specific(Vec<Node<ImportName>>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportName {
  // For `export {a as b}`, this is `a`.
  #[drive(skip)]
  pub exportable: String,
  // For `export {a as b}`, this is `b`.
  pub alias: Node<IdPat>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ExportNames {
  // `export * from "module"` or `export * as alias from "module"`.
  All(Option<Node<IdPat>>),
  // `export {a as default, b as c, d}`.
  Specific(Vec<Node<ExportName>>),
}
