use ahash::HashSet;
use ahash::HashSetExt;
use derive_visitor::Drive;
use derive_visitor::Visitor;
use parse_js::ast::expr::pat::ClassOrFuncName;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::import_export::ExportName;
use parse_js::ast::node::Node;
use parse_js::ast::stx::TopLevel;
use parse_js::char::is_id_continue;
use parse_js::char::is_valid_identifier;
use parse_js::lex::KEYWORD_STRS;

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type ClassOrFuncNameNode = Node<ClassOrFuncName>;
type ExportNameNode = Node<ExportName>;

#[derive(Visitor)]
#[visitor(
  IdExprNode(enter),
  IdPatNode(enter),
  ClassOrFuncNameNode(enter),
  ExportNameNode(enter)
)]
struct Collector {
  used: HashSet<String>,
  bound: HashSet<String>,
}

impl Collector {
  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.used.insert(node.stx.name.clone());
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    self.used.insert(node.stx.name.clone());
    self.bound.insert(node.stx.name.clone());
  }

  fn enter_class_or_func_name_node(&mut self, node: &ClassOrFuncNameNode) {
    self.used.insert(node.stx.name.clone());
    self.bound.insert(node.stx.name.clone());
  }

  fn enter_export_name_node(&mut self, node: &ExportNameNode) {
    self.used.insert(node.stx.exportable.clone());
  }
}

/// Collision-free identifiers for one compilation unit.
///
/// Seeded with every identifier string in the program, so a generated name never shadows or is shadowed by
/// anything the program mentions, in any scope.
#[derive(Debug)]
pub struct FreshNames {
  used: HashSet<String>,
  bound: HashSet<String>,
}

impl FreshNames {
  pub fn new(top: &Node<TopLevel>) -> Self {
    let mut collector = Collector {
      used: HashSet::new(),
      bound: HashSet::new(),
    };
    top.drive(&mut collector);
    Self {
      used: collector.used,
      bound: collector.bound,
    }
  }

  /// Whether anything in the program declares `name`.
  pub fn is_bound(&self, name: &str) -> bool {
    self.bound.contains(name)
  }

  /// Reserves `name` verbatim, e.g. a helper imported under its own name.
  pub fn reserve(&mut self, name: &str) {
    self.used.insert(name.to_string());
    self.bound.insert(name.to_string());
  }

  /// Generates `_hint`, `_hint2`, `_hint3`, ... skipping anything already used.
  pub fn generate(&mut self, hint: &str) -> String {
    let base = uid_base(hint);
    let mut i = 1usize;
    loop {
      let candidate = if i > 1 {
        format!("_{base}{i}")
      } else {
        format!("_{base}")
      };
      if !self.used.contains(&candidate) {
        self.reserve(&candidate);
        return candidate;
      };
      i += 1;
    }
  }
}

fn is_reserved(name: &str) -> bool {
  KEYWORD_STRS.contains_key(name.as_bytes())
}

/// Normalizes arbitrary text into an identifier: invalid characters split words, which are then camel-cased.
pub fn to_identifier(input: &str) -> String {
  let mut name = String::with_capacity(input.len());
  let mut upper_next = false;
  let mut started = false;
  for c in input.chars() {
    let is_id_char = c.len_utf8() > 1 || is_id_continue(c as u8);
    if !is_id_char {
      // Leading separators and digits are dropped; interior ones capitalize the next character.
      if started {
        upper_next = true;
      };
      continue;
    };
    if !started {
      if c.is_ascii_digit() {
        continue;
      };
      started = true;
    };
    if upper_next {
      name.extend(c.to_uppercase());
      upper_next = false;
    } else {
      name.push(c);
    };
  }
  if !is_valid_identifier(&name) || is_reserved(&name) {
    name.insert(0, '_');
  };
  name
}

fn uid_base(hint: &str) -> String {
  let name = to_identifier(hint);
  let name = name.trim_start_matches('_');
  name.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}
