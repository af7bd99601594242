use super::Parser;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn func_params(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_until_tt(TT::ParenthesisClose, |p| {
      p.with_loc(|p| {
        let decorators = p.decorators()?;
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.pat_decl()?;
        let default_value = if rest {
          None
        } else {
          p.consume_if(TT::Equals).and_then(|| p.expr_assign())?
        };
        Ok(ParamDecl {
          decorators,
          rest,
          pattern,
          default_value,
        })
      })
    })
  }

  pub fn func_body(&mut self) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::BraceOpen)?;
    let body = self.repeat_until_tt(TT::BraceClose, |p| p.stmt())?;
    self.require(TT::BraceClose)?;
    Ok(body)
  }

  /// Parameters and block body of a non-arrow function, after any name.
  pub fn method_func(&mut self, async_: bool, generator: bool) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let parameters = p.func_params()?;
      let body = FuncBody::Block(p.func_body()?);
      Ok(Func {
        arrow: false,
        async_,
        generator,
        parameters,
        body,
      })
    })
  }

  /// Parses `[async] function [*] [name]`, returning the async and generator flags with the optional name.
  pub fn func_header(&mut self) -> SyntaxResult<(bool, bool, Option<Node<ClassOrFuncName>>)> {
    let async_ = if self.is_contextual(self.peek(), "async") {
      self.consume();
      true
    } else {
      false
    };
    self.require(TT::KeywordFunction)?;
    let generator = self.consume_if(TT::Asterisk).is_match();
    let name = self.class_or_func_name();
    Ok((async_, generator, name))
  }

  pub fn class_or_func_name(&mut self) -> Option<Node<ClassOrFuncName>> {
    let t = self.peek();
    if t.typ != TT::Identifier {
      return None;
    };
    self.consume();
    Some(Node::new(t.loc, ClassOrFuncName {
      name: self.string(t.loc),
    }))
  }

  pub fn func_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self
      .with_loc(|p| {
        let (async_, generator, name) = p.func_header()?;
        let func = p.method_func(async_, generator)?;
        Ok(FuncExpr { name, func })
      })
      .map(|node| node.into_wrapped())
  }
}
