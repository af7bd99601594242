use crate::build::PropertyKey;
use crate::detect::DecoratorPresence;
use crate::err;
use crate::helpers::Helper;
use crate::helpers::HelperImports;
use crate::names::FreshNames;
use crate::options::DecorateOptions;
use crate::options::Pipeline;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::class_or_object::ClassOrObjMemberDirectKey;
use parse_js::ast::expr::pat::ClassOrFuncName;
use parse_js::ast::expr::Decorator;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::loc::Loc;
use parse_js::token::TT;

/// State for transforming one compilation unit. Dropped when the unit is done, so nothing carries over to the next file.
pub(crate) struct UnitContext {
  pub file: FileId,
  pub options: DecorateOptions,
  pub pipeline: Pipeline,
  pub names: FreshNames,
  pub helpers: HelperImports,
  pub diagnostics: Vec<Diagnostic>,
}

impl UnitContext {
  pub fn new(top: &Node<TopLevel>, file: FileId, options: &DecorateOptions) -> Self {
    Self {
      file,
      options: options.clone(),
      pipeline: options.pipeline(),
      names: FreshNames::new(top),
      helpers: HelperImports::new(top, &options.helper_module, options.helper_imports),
      diagnostics: Vec::new(),
    }
  }

  pub fn helper(&mut self, helper: Helper) -> String {
    self.helpers.ensure(helper, &mut self.names)
  }

  pub fn report(&mut self, diagnostic: Diagnostic) {
    self.diagnostics.push(diagnostic);
  }

  /// The key of a decorated member, or a diagnostic if it cannot be lowered.
  pub fn property_key(&mut self, key: &ClassOrObjKey) -> Option<PropertyKey> {
    match key {
      ClassOrObjKey::Computed(expr) => {
        self.report(err::computed_key(self.file, expr.loc));
        None
      }
      ClassOrObjKey::Direct(direct) if direct.stx.is_private() => {
        self.report(err::private_key(self.file, direct.loc, &direct.stx.key));
        None
      }
      ClassOrObjKey::Direct(direct) => Some(plain_property_key(&direct.stx)),
    }
  }
}

pub(crate) fn plain_property_key(key: &ClassOrObjMemberDirectKey) -> PropertyKey {
  match key.tt {
    TT::LiteralString | TT::LiteralNumber => PropertyKey::Literal(key.key.clone()),
    _ => PropertyKey::Name(key.key.clone()),
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExportKind {
  None,
  Named,
  Default,
}

/// A decorated class declaration taken apart for lowering.
pub(crate) struct ClassUnit {
  pub loc: Loc,
  /// The identifier holding the class value after lowering.
  pub binding: String,
  /// Reported to class decorators as the class name.
  pub display_name: String,
  pub name: Option<Node<ClassOrFuncName>>,
  pub export: ExportKind,
  pub decorators: Vec<Node<Decorator>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<ClassMember>,
  pub presence: DecoratorPresence,
}

pub(crate) fn member_loc(member: &ClassMember) -> Loc {
  match member {
    ClassMember::Field(m) => m.loc,
    ClassMember::Accessor(m) => m.loc,
    ClassMember::Method(m) => m.loc,
    ClassMember::StaticBlock(m) => m.loc,
  }
}
