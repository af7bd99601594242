use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::expr::Decorator;
use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum DecoratorPresence {
  None,
  Decorators,
  /// At least one method or constructor parameter is decorated, so `__param` is needed.
  DecoratorsWithParameters,
}

impl DecoratorPresence {
  pub fn any(self) -> bool {
    self != DecoratorPresence::None
  }
}

fn params_decorated(func: &Node<Func>) -> bool {
  func
    .stx
    .parameters
    .iter()
    .any(|p| !p.stx.decorators.is_empty())
}

/// Classifies a class by the decorators on it, its members and its method parameters.
pub fn detect(decorators: &[Node<Decorator>], members: &[ClassMember]) -> DecoratorPresence {
  let mut presence = if decorators.is_empty() {
    DecoratorPresence::None
  } else {
    DecoratorPresence::Decorators
  };
  for member in members {
    if !member.decorators().is_empty() {
      presence = presence.max(DecoratorPresence::Decorators);
    };
    let func = match member {
      ClassMember::Method(m) => &m.stx.func,
      ClassMember::Accessor(m) => &m.stx.func,
      ClassMember::Field(_) | ClassMember::StaticBlock(_) => continue,
    };
    if params_decorated(func) {
      return DecoratorPresence::DecoratorsWithParameters;
    };
  }
  presence
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_js::ast::stmt::Stmt;

  fn presence_of(source: &str) -> DecoratorPresence {
    let top = parse_js::parse(source).unwrap();
    match top.stx.body[0].stx.as_ref() {
      Stmt::ClassDecl(decl) => detect(&decl.stx.decorators, &decl.stx.members),
      _ => panic!("expected class declaration"),
    }
  }

  #[test]
  fn undecorated_class() {
    assert_eq!(presence_of("class A { x = 1; m(a) {} static { f(); } }"), DecoratorPresence::None);
  }

  #[test]
  fn class_and_member_decorators() {
    assert_eq!(presence_of("@D class A {}"), DecoratorPresence::Decorators);
    assert_eq!(presence_of("class A { @D x; }"), DecoratorPresence::Decorators);
    assert_eq!(presence_of("class A { @D get x() { return 1; } }"), DecoratorPresence::Decorators);
  }

  #[test]
  fn parameter_decorators() {
    assert_eq!(presence_of("class A { m(@P a) {} }"), DecoratorPresence::DecoratorsWithParameters);
    assert_eq!(
      presence_of("class A { constructor(a, @Inject b) {} }"),
      DecoratorPresence::DecoratorsWithParameters
    );
    assert_eq!(
      presence_of("@D class A { set v(@P a) {} }"),
      DecoratorPresence::DecoratorsWithParameters
    );
  }
}
