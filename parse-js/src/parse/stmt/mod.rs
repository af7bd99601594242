pub mod decl;

use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::WhileStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let (t0, t1) = self.peek_2();
    match t0.typ {
      TT::BraceOpen => self.block_stmt(),
      TT::Semicolon => {
        self.consume();
        Ok(Node::new(t0.loc, EmptyStmt {}).into_wrapped())
      }
      TT::At => self.decorated_stmt(),
      TT::KeywordClass => Ok(self.class_decl(Vec::new(), false, false)?.into_wrapped()),
      TT::KeywordFunction => Ok(self.func_decl(false, false)?.into_wrapped()),
      TT::Identifier
        if self.is_contextual(t0, "async")
          && t1.typ == TT::KeywordFunction
          && !t1.preceded_by_line_terminator =>
      {
        Ok(self.func_decl(false, false)?.into_wrapped())
      }
      TT::KeywordConst | TT::KeywordVar => self.var_decl_stmt(),
      TT::Identifier
        if self.is_contextual(t0, "let")
          && matches!(t1.typ, TT::Identifier | TT::BracketOpen | TT::BraceOpen) =>
      {
        self.var_decl_stmt()
      }
      TT::KeywordIf => self.if_stmt(),
      TT::KeywordWhile => self.while_stmt(),
      TT::KeywordFor => self.for_stmt(),
      TT::KeywordReturn => self.return_stmt(),
      TT::KeywordThrow => self.throw_stmt(),
      TT::KeywordBreak | TT::KeywordContinue => self.break_or_continue_stmt(),
      TT::KeywordImport if !matches!(t1.typ, TT::ParenthesisOpen | TT::Dot) => self.import_stmt(),
      TT::KeywordExport => self.export_stmt(Vec::new()),
      TT::KeywordSwitch => Err(t0.error(SyntaxErrorType::UnsupportedSyntax("switch statement"))),
      TT::KeywordTry => Err(t0.error(SyntaxErrorType::UnsupportedSyntax("try statement"))),
      TT::KeywordDo => Err(t0.error(SyntaxErrorType::UnsupportedSyntax("do-while statement"))),
      TT::KeywordWith => Err(t0.error(SyntaxErrorType::UnsupportedSyntax("with statement"))),
      TT::KeywordDebugger => Err(t0.error(SyntaxErrorType::UnsupportedSyntax("debugger statement"))),
      _ => self.expr_stmt(),
    }
  }

  pub fn block_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| Ok(BlockStmt { body: p.func_body()? }))
      .map(|node| node.into_wrapped())
  }

  // Decorators at the start of a statement belong to a class declaration, optionally exported.
  fn decorated_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let decorators = self.decorators()?;
    let t = self.peek();
    match t.typ {
      TT::KeywordExport => self.export_stmt(decorators),
      TT::KeywordClass => Ok(self.class_decl(decorators, false, false)?.into_wrapped()),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("class after decorators"))),
    }
  }

  fn var_decl_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let decl = self.var_decl(false)?;
    self.require_semicolon_or_asi()?;
    Ok(decl.into_wrapped())
  }

  fn expr_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let expr = self.expr()?;
    self.require_semicolon_or_asi()?;
    Ok(Node::new(expr.loc, ExprStmt { expr }).into_wrapped())
  }

  fn paren_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr()?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  fn if_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordIf)?;
        let test = p.paren_expr()?;
        let consequent = p.stmt()?;
        let alternate = p.consume_if(TT::KeywordElse).and_then(|| p.stmt())?;
        Ok(IfStmt {
          test,
          consequent,
          alternate,
        })
      })
      .map(|node| node.into_wrapped())
  }

  fn while_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordWhile)?;
        let condition = p.paren_expr()?;
        let body = p.stmt()?;
        Ok(WhileStmt { condition, body })
      })
      .map(|node| node.into_wrapped())
  }

  fn for_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordFor)?;
        p.require(TT::ParenthesisOpen)?;
        let (t0, t1) = p.peek_2();
        let init = match t0.typ {
          TT::Semicolon => ForInit::None,
          TT::KeywordConst | TT::KeywordVar => ForInit::Decl(p.var_decl(false)?),
          TT::Identifier
            if p.is_contextual(t0, "let")
              && matches!(t1.typ, TT::Identifier | TT::BracketOpen | TT::BraceOpen) =>
          {
            ForInit::Decl(p.var_decl(false)?)
          }
          _ => ForInit::Expr(p.expr()?),
        };
        let t = p.peek();
        if t.typ == TT::KeywordIn || p.is_contextual(t, "of") {
          return Err(t.error(SyntaxErrorType::UnsupportedSyntax("for-in or for-of loop")));
        };
        p.require(TT::Semicolon)?;
        let condition = if p.peek().typ == TT::Semicolon {
          None
        } else {
          Some(p.expr()?)
        };
        p.require(TT::Semicolon)?;
        let post = if p.peek().typ == TT::ParenthesisClose {
          None
        } else {
          Some(p.expr()?)
        };
        p.require(TT::ParenthesisClose)?;
        let body = p.stmt()?;
        Ok(ForStmt {
          init,
          condition,
          post,
          body,
        })
      })
      .map(|node| node.into_wrapped())
  }

  fn return_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordReturn)?;
        let t = p.peek();
        let value = if t.preceded_by_line_terminator
          || matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF)
        {
          None
        } else {
          Some(p.expr()?)
        };
        p.require_semicolon_or_asi()?;
        Ok(ReturnStmt { value })
      })
      .map(|node| node.into_wrapped())
  }

  fn throw_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    self
      .with_loc(|p| {
        p.require(TT::KeywordThrow)?;
        let t = p.peek();
        if t.preceded_by_line_terminator {
          return Err(t.error(SyntaxErrorType::LineTerminatorAfterThrow));
        };
        let value = p.expr()?;
        p.require_semicolon_or_asi()?;
        Ok(ThrowStmt { value })
      })
      .map(|node| node.into_wrapped())
  }

  fn break_or_continue_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.consume();
    let t = self.peek();
    let label = if t.typ == TT::Identifier && !t.preceded_by_line_terminator {
      Some(self.consume_as_string())
    } else {
      None
    };
    self.require_semicolon_or_asi()?;
    let loc = self.loc_from(start.loc);
    Ok(if start.typ == TT::KeywordBreak {
      Node::new(loc, BreakStmt { label }).into_wrapped()
    } else {
      Node::new(loc, ContinueStmt { label }).into_wrapped()
    })
  }
}
