//! Lowers JavaScript class decorators into plain code that calls the `tslib` runtime helpers.
//!
//! Two decorator flavors are supported, selected by [`DecorateOptions::experimental_decorators`]:
//!
//! - Legacy decorators, lowered to `__decorate` and `__param` calls after the class.
//! - Stage-3 decorators, lowered to `__esDecorate` and `__runInitializers` calls in a static block, with decorated
//!   fields initialized in the constructor.
//!
//! ```
//! use decorate_js::{transform_source, DecorateOptions};
//! use emit_js::EmitOptions;
//!
//! let out = transform_source("@sealed class A {}", &DecorateOptions::legacy(), EmitOptions::minified()).unwrap();
//! assert_eq!(out, r#"import{__decorate}from"tslib";class A{}A=__decorate([sealed],A);"#);
//! ```

use derive_visitor::DriveMut;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use emit_js::emit_top_level;
use emit_js::EmitOptions;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use rewrite::DeclarationRewriter;
use tracing::debug_span;
use unit::UnitContext;

mod build;
pub mod detect;
pub mod err;
pub mod helpers;
mod legacy;
pub mod names;
pub mod options;
mod rewrite;
mod stage3;
mod unit;

#[cfg(test)]
mod tests;

pub use detect::detect;
pub use detect::DecoratorPresence;
pub use err::DecorateError;
pub use options::DecorateOptions;
pub use options::EmissionOrder;
pub use options::HelperImportStrategy;
pub use options::MetadataMode;
pub use options::Pipeline;

/// Lowers every decorated class declaration in `top` and adds the helper imports they need.
///
/// Unsupported decorator placements are reported rather than dropped; if any are found, the tree may be partially
/// rewritten and must not be used.
pub fn transform(top: &mut Node<TopLevel>, file: FileId, options: &DecorateOptions) -> Result<(), Vec<Diagnostic>> {
  let span = debug_span!("decorate", file = file.0, pipeline = ?options.pipeline());
  let _guard = span.enter();

  let mut ctx = UnitContext::new(top, file, options);
  top.drive_mut(&mut DeclarationRewriter { ctx: &mut ctx });
  let UnitContext {
    helpers,
    diagnostics,
    ..
  } = ctx;
  if diagnostics.iter().any(Diagnostic::is_error) {
    return Err(diagnostics);
  };
  helpers.flush(top);
  Ok(())
}

/// Parses, transforms and prints `source` as a single compilation unit.
pub fn transform_source(source: &str, options: &DecorateOptions, emit: EmitOptions) -> Result<String, DecorateError> {
  let mut top = parse_js::parse(source)?;
  transform(&mut top, FileId(0), options).map_err(DecorateError::Transform)?;
  Ok(emit_top_level(&top, emit)?)
}
