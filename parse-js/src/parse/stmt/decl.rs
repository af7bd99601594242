use super::super::Parser;
use crate::ast::expr::Decorator;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// A `var`, `let` or `const` declaration, without the statement terminator so it can also be used as a `for` initialiser.
  pub fn var_decl(&mut self, export: bool) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let t = p.consume();
      let mode = match t.typ {
        TT::KeywordConst => VarDeclMode::Const,
        TT::KeywordVar => VarDeclMode::Var,
        TT::Identifier if p.str(t.loc) == "let" => VarDeclMode::Let,
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
      };
      let mut declarators = Vec::new();
      loop {
        let pattern = p.pat_decl()?;
        let initializer = p.consume_if(TT::Equals).and_then(|| p.expr_assign())?;
        declarators.push(VarDeclarator {
          pattern,
          initializer,
        });
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      Ok(VarDecl {
        export,
        mode,
        declarators,
      })
    })
  }

  pub fn func_decl(&mut self, export: bool, export_default: bool) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let (async_, generator, name) = p.func_header()?;
      if name.is_none() && !export_default {
        return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("function name")));
      };
      let function = p.method_func(async_, generator)?;
      Ok(FuncDecl {
        export,
        export_default,
        name,
        function,
      })
    })
  }

  /// A class declaration; `decorators` have already been consumed by the caller.
  pub fn class_decl(
    &mut self,
    decorators: Vec<Node<Decorator>>,
    export: bool,
    export_default: bool,
  ) -> SyntaxResult<Node<ClassDecl>> {
    let start = match decorators.first() {
      Some(d) => d.loc,
      None => self.peek().loc,
    };
    self.require(TT::KeywordClass)?;
    let name = self.class_or_func_name();
    if name.is_none() && !export_default {
      return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("class name")));
    };
    let extends = self.consume_if(TT::KeywordExtends).and_then(|| self.lhs_expr())?;
    let members = self.class_body()?;
    Ok(Node::new(self.loc_from(start), ClassDecl {
      decorators,
      export,
      export_default,
      name,
      extends,
      members,
    }))
  }
}
