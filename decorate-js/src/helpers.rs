use crate::build;
use crate::names::FreshNames;
use crate::options::HelperImportStrategy;
use ahash::HashMap;
use ahash::HashMapExt;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::import_export::ImportNames;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::Stmt;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use serde::Serialize;
use tracing::trace;

/// Runtime helpers provided by the helper module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Helper {
  Decorate,
  Param,
  EsDecorate,
  RunInitializers,
  /// Part of the helper module's surface, but never requested: class names are passed through `_className`.
  SetFunctionName,
}

impl Helper {
  pub fn name(self) -> &'static str {
    match self {
      Helper::Decorate => "__decorate",
      Helper::Param => "__param",
      Helper::EsDecorate => "__esDecorate",
      Helper::RunInitializers => "__runInitializers",
      Helper::SetFunctionName => "__setFunctionName",
    }
  }
}

/// Local bindings for helpers within one compilation unit.
#[derive(Debug)]
pub struct HelperImports {
  module: String,
  strategy: HelperImportStrategy,
  // Imported name to local name, for `import { a as b } from module` already in the program.
  existing: HashMap<String, String>,
  locals: HashMap<Helper, String>,
  // Specifiers to insert, in first-use order.
  pending: Vec<(Helper, String)>,
}

impl HelperImports {
  pub fn new(top: &Node<TopLevel>, module: &str, strategy: HelperImportStrategy) -> Self {
    let mut existing = HashMap::new();
    for stmt in &top.stx.body {
      let Stmt::Import(import) = stmt.stx.as_ref() else {
        continue;
      };
      if import.stx.module != module {
        continue;
      };
      let Some(ImportNames::Specific(names)) = &import.stx.names else {
        continue;
      };
      for name in names {
        if let Pat::Id(alias) = name.stx.alias.stx.pat.stx.as_ref() {
          existing
            .entry(name.stx.importable.clone())
            .or_insert_with(|| alias.stx.name.clone());
        };
      }
    }
    Self {
      module: module.to_string(),
      strategy,
      existing,
      locals: HashMap::new(),
      pending: Vec::new(),
    }
  }

  /// Returns the local identifier bound to `helper`, arranging for an import if there isn't one yet.
  pub fn ensure(&mut self, helper: Helper, names: &mut FreshNames) -> String {
    if let Some(local) = self.locals.get(&helper) {
      return local.clone();
    };
    let local = if let Some(local) = self.existing.get(helper.name()) {
      trace!(helper = helper.name(), local = local.as_str(), "reusing helper import");
      local.clone()
    } else {
      let local = if names.is_bound(helper.name()) {
        names.generate(helper.name())
      } else {
        names.reserve(helper.name());
        helper.name().to_string()
      };
      trace!(helper = helper.name(), local = local.as_str(), "adding helper import");
      self.pending.push((helper, local.clone()));
      local
    };
    self.locals.insert(helper, local.clone());
    local
  }

  /// Inserts the imports for every newly requested helper at the top of the program.
  pub fn flush(self, top: &mut Node<TopLevel>) {
    let loc = Loc(0, 0);
    match self.strategy {
      HelperImportStrategy::Eager => {
        // Each import is unshifted as its helper is first requested, so the latest one ends up first.
        for (helper, local) in self.pending {
          let import = build::import_named(loc, &self.module, vec![(helper.name(), local)]);
          top.stx.body.insert(0, import);
        }
      }
      HelperImportStrategy::Deferred => {
        if self.pending.is_empty() {
          return;
        };
        let specifiers = self
          .pending
          .into_iter()
          .map(|(helper, local)| (helper.name(), local))
          .collect();
        top
          .stx
          .body
          .insert(0, build::import_named(loc, &self.module, specifiers));
      }
    };
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use emit_js::emit_top_level;
  use emit_js::EmitOptions;

  fn run(source: &str, strategy: HelperImportStrategy, helpers: &[Helper]) -> (Vec<String>, String) {
    let mut top = parse_js::parse(source).unwrap();
    let mut names = FreshNames::new(&top);
    let mut imports = HelperImports::new(&top, "tslib", strategy);
    let locals = helpers
      .iter()
      .map(|h| imports.ensure(*h, &mut names))
      .collect();
    imports.flush(&mut top);
    (locals, emit_top_level(&top, EmitOptions::minified()).unwrap())
  }

  #[test]
  fn ensure_is_idempotent() {
    let (locals, out) = run(
      "f();",
      HelperImportStrategy::Deferred,
      &[Helper::Decorate, Helper::Param, Helper::Decorate],
    );
    assert_eq!(locals, vec!["__decorate", "__param", "__decorate"]);
    assert_eq!(out, r#"import{__decorate,__param}from"tslib";f();"#);
  }

  #[test]
  fn eager_imports_are_unshifted() {
    let (_, out) = run(
      "f();",
      HelperImportStrategy::Eager,
      &[Helper::Decorate, Helper::Param, Helper::Param],
    );
    assert_eq!(
      out,
      r#"import{__param}from"tslib";import{__decorate}from"tslib";f();"#
    );
  }

  #[test]
  fn reuses_existing_alias() {
    for strategy in [HelperImportStrategy::Eager, HelperImportStrategy::Deferred] {
      let (locals, out) = run(
        r#"import { __decorate as d } from "tslib"; f();"#,
        strategy,
        &[Helper::Decorate, Helper::Decorate],
      );
      assert_eq!(locals, vec!["d", "d"]);
      assert_eq!(out, r#"import{__decorate as d}from"tslib";f();"#);
    }
  }

  #[test]
  fn ignores_imports_from_other_modules() {
    let (locals, out) = run(
      r#"import { __decorate } from "other"; f();"#,
      HelperImportStrategy::Deferred,
      &[Helper::Decorate],
    );
    assert_eq!(locals, vec!["_decorate"]);
    assert_eq!(
      out,
      r#"import{__decorate as _decorate}from"tslib";import{__decorate}from"other";f();"#
    );
  }

  #[test]
  fn avoids_shadowed_helper_names() {
    let (locals, _) = run(
      "function f(__param) { return __param; }",
      HelperImportStrategy::Deferred,
      &[Helper::Param],
    );
    assert_eq!(locals, vec!["_param"]);
  }
}
