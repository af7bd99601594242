pub mod lit;
pub mod pat;

use super::operator::MULTARY_OPERATOR_MAPPING;
use super::operator::UNARY_OPERATOR_MAPPING;
use super::Parser;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::expr::pat::IdPat;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::operator::PRECEDENCE_COMMA;
use crate::operator::PRECEDENCE_UNARY;
use crate::token::Token;
use crate::token::TT;

fn is_valid_assignment_target(expr: &Node<Expr>) -> bool {
  matches!(
    expr.stx.as_ref(),
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_)
  )
}

// Tokens that can begin the operand of a contextual `await`.
fn can_start_await_operand(t: Token) -> bool {
  !t.preceded_by_line_terminator
    && matches!(
      t.typ,
      TT::Identifier
        | TT::KeywordClass
        | TT::KeywordFunction
        | TT::KeywordNew
        | TT::KeywordSuper
        | TT::KeywordThis
        | TT::LiteralFalse
        | TT::LiteralNull
        | TT::LiteralNumber
        | TT::LiteralString
        | TT::LiteralTrue
        | TT::ParenthesisOpen
        | TT::BracketOpen
    )
}

impl<'a> Parser<'a> {
  /// Full expression, including the comma operator.
  pub fn expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(PRECEDENCE_COMMA)
  }

  /// An `AssignmentExpression`: anything except an unparenthesised comma sequence.
  pub fn expr_assign(&mut self) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(PRECEDENCE_ASSIGNMENT)
  }

  pub fn expr_with_min_prec(&mut self, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.expr_operand()?;
    loop {
      let t = self.peek();
      let Some(operator) = MULTARY_OPERATOR_MAPPING.get(&t.typ) else {
        break;
      };
      if operator.precedence < min_prec {
        break;
      };
      self.consume();

      if operator.name == OperatorName::Conditional {
        let consequent = self.expr_assign()?;
        self.require(TT::Colon)?;
        let alternate = self.expr_assign()?;
        let loc = left.loc + alternate.loc;
        left = Node::new(loc, CondExpr {
          test: left,
          consequent,
          alternate,
        })
        .into_wrapped();
        continue;
      };

      if operator.name.is_assignment() && !is_valid_assignment_target(&left) {
        return Err(left.error(SyntaxErrorType::InvalidAssigmentTarget));
      };
      let next_min_prec = match operator.associativity {
        Associativity::Left => operator.precedence + 1,
        Associativity::Right => operator.precedence,
      };
      let right = self.expr_with_min_prec(next_min_prec)?;
      let loc = left.loc + right.loc;
      left = Node::new(loc, BinaryExpr {
        operator: operator.name,
        left,
        right,
      })
      .into_wrapped();
    }
    Ok(left)
  }

  fn expr_operand(&mut self) -> SyntaxResult<Node<Expr>> {
    let (t0, t1) = self.peek_2();
    if let Some(operator) = UNARY_OPERATOR_MAPPING.get(&t0.typ) {
      self.consume();
      let argument = self.expr_with_min_prec(PRECEDENCE_UNARY)?;
      if matches!(
        operator.name,
        OperatorName::PrefixIncrement | OperatorName::PrefixDecrement
      ) && !is_valid_assignment_target(&argument)
      {
        return Err(argument.error(SyntaxErrorType::InvalidAssigmentTarget));
      };
      return Ok(
        Node::new(t0.loc + argument.loc, UnaryExpr {
          operator: operator.name,
          argument,
        })
        .into_wrapped(),
      );
    };
    if self.is_contextual(t0, "await") && can_start_await_operand(t1) {
      self.consume();
      let argument = self.expr_with_min_prec(PRECEDENCE_UNARY)?;
      return Ok(
        Node::new(t0.loc + argument.loc, UnaryExpr {
          operator: OperatorName::Await,
          argument,
        })
        .into_wrapped(),
      );
    };

    let primary = self.expr_primary()?;
    let operand = self.expr_chain(primary, true)?;
    let t = self.peek();
    let postfix = match t.typ {
      TT::PlusPlus if !t.preceded_by_line_terminator => OperatorName::PostfixIncrement,
      TT::HyphenHyphen if !t.preceded_by_line_terminator => OperatorName::PostfixDecrement,
      _ => return Ok(operand),
    };
    if !is_valid_assignment_target(&operand) {
      return Err(operand.error(SyntaxErrorType::InvalidAssigmentTarget));
    };
    self.consume();
    Ok(
      Node::new(operand.loc + t.loc, UnaryPostfixExpr {
        operator: postfix,
        argument: operand,
      })
      .into_wrapped(),
    )
  }

  /// Member accesses and calls following `left`. Calls are excluded for the callee of `new`.
  pub fn expr_chain(&mut self, mut left: Node<Expr>, allow_call: bool) -> SyntaxResult<Node<Expr>> {
    loop {
      let t = self.peek();
      left = match t.typ {
        TT::Dot => {
          self.consume();
          let right = self.member_name()?;
          Node::new(self.loc_from(left.loc), MemberExpr {
            optional_chaining: false,
            left,
            right,
          })
          .into_wrapped()
        }
        TT::QuestionDot => {
          if !allow_call {
            return Err(t.error(SyntaxErrorType::UnsupportedSyntax(
              "optional chain in `new` callee",
            )));
          };
          self.consume();
          match self.peek().typ {
            TT::BracketOpen => self.computed_member(left, true)?,
            TT::ParenthesisOpen => self.call(left, true)?,
            _ => {
              let right = self.member_name()?;
              Node::new(self.loc_from(left.loc), MemberExpr {
                optional_chaining: true,
                left,
                right,
              })
              .into_wrapped()
            }
          }
        }
        TT::BracketOpen => self.computed_member(left, false)?,
        TT::ParenthesisOpen if allow_call => self.call(left, false)?,
        _ => break,
      };
    }
    Ok(left)
  }

  fn computed_member(&mut self, object: Node<Expr>, optional_chaining: bool) -> SyntaxResult<Node<Expr>> {
    self.require(TT::BracketOpen)?;
    let member = self.expr()?;
    self.require(TT::BracketClose)?;
    Ok(
      Node::new(self.loc_from(object.loc), ComputedMemberExpr {
        optional_chaining,
        object,
        member,
      })
      .into_wrapped(),
    )
  }

  fn call(&mut self, callee: Node<Expr>, optional_chaining: bool) -> SyntaxResult<Node<Expr>> {
    let arguments = self.call_args()?;
    Ok(
      Node::new(self.loc_from(callee.loc), CallExpr {
        optional_chaining,
        callee,
        arguments,
      })
      .into_wrapped(),
    )
  }

  pub fn call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    self.require(TT::ParenthesisOpen)?;
    self.list_until_tt(TT::ParenthesisClose, |p| {
      p.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr_assign()?;
        Ok(CallArg { spread, value })
      })
    })
  }

  /// Property name after `.` or `?.`; keywords are allowed here.
  pub fn member_name(&mut self) -> SyntaxResult<String> {
    let t = self.peek();
    if t.typ == TT::Identifier || t.typ == TT::PrivateMember || KEYWORDS_MAPPING.contains_key(&t.typ) {
      Ok(self.consume_as_string())
    } else {
      Err(t.error(SyntaxErrorType::ExpectedSyntax("member name")))
    }
  }

  /// A `LeftHandSideExpression`, as used for the `extends` clause of a class.
  pub fn lhs_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let primary = self.expr_primary()?;
    self.expr_chain(primary, true)
  }

  fn expr_primary(&mut self) -> SyntaxResult<Node<Expr>> {
    let (t0, t1, t2) = self.peek_3();
    Ok(match t0.typ {
      TT::Identifier => {
        if t1.typ == TT::EqualsChevronRight && !t1.preceded_by_line_terminator {
          return self.arrow_func_single_param(false);
        };
        if self.is_contextual(t0, "async") && !t1.preceded_by_line_terminator {
          match t1.typ {
            TT::KeywordFunction => return self.func_expr(),
            TT::Identifier if t2.typ == TT::EqualsChevronRight => {
              return self.arrow_func_single_param(true);
            }
            TT::ParenthesisOpen => {
              if let Some(arrow) = self.try_arrow_func(true)? {
                return Ok(arrow);
              };
            }
            _ => {}
          };
        };
        self.consume();
        Node::new(t0.loc, IdExpr {
          name: self.string(t0.loc),
        })
        .into_wrapped()
      }
      TT::ParenthesisOpen => {
        if let Some(arrow) = self.try_arrow_func(false)? {
          return Ok(arrow);
        };
        self.consume();
        let mut inner = self.expr()?;
        let close = self.require(TT::ParenthesisClose)?;
        inner.loc = t0.loc + close.loc;
        inner
      }
      TT::KeywordThis => {
        self.consume();
        Node::new(t0.loc, ThisExpr {}).into_wrapped()
      }
      TT::KeywordSuper => {
        self.consume();
        Node::new(t0.loc, SuperExpr {}).into_wrapped()
      }
      TT::LiteralNull | TT::LiteralTrue | TT::LiteralFalse | TT::LiteralNumber | TT::LiteralString => {
        self.lit()?
      }
      TT::BracketOpen => self.lit_arr()?,
      TT::BraceOpen => self.lit_obj()?,
      TT::KeywordFunction => self.func_expr()?,
      TT::KeywordClass | TT::At => self.class_expr()?,
      TT::KeywordNew => self.expr_new()?,
      TT::Slash | TT::SlashEquals => {
        return Err(t0.error(SyntaxErrorType::UnsupportedSyntax(
          "regular expression literal",
        )))
      }
      TT::KeywordImport => {
        return Err(t0.error(SyntaxErrorType::UnsupportedSyntax("dynamic import")))
      }
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    })
  }

  fn expr_new(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordNew)?;
    let callee = if self.peek().typ == TT::KeywordNew {
      self.expr_new()?
    } else {
      self.expr_primary()?
    };
    let callee = self.expr_chain(callee, false)?;
    let arguments = if self.peek().typ == TT::ParenthesisOpen {
      self.call_args()?
    } else {
      Vec::new()
    };
    Ok(Node::new(self.loc_from(start.loc), NewExpr { callee, arguments }).into_wrapped())
  }

  fn arrow_func_single_param(&mut self, async_: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc;
    if async_ {
      self.consume();
    };
    let param = self.with_loc(|p| {
      let name = p.require(TT::Identifier)?;
      let pattern = Node::new(name.loc, PatDecl {
        pat: Node::new(name.loc, IdPat {
          name: p.string(name.loc),
        })
        .into_wrapped(),
      });
      Ok(ParamDecl {
        decorators: Vec::new(),
        rest: false,
        pattern,
        default_value: None,
      })
    })?;
    self.require(TT::EqualsChevronRight)?;
    self.arrow_func_body(start, async_, vec![param])
  }

  /// Attempts to parse `(params) =>`, rewinding and returning None if the parenthesis turns out to be a parenthesised expression.
  fn try_arrow_func(&mut self, async_: bool) -> SyntaxResult<Option<Node<Expr>>> {
    let cp = self.checkpoint();
    let start = self.peek().loc;
    if async_ {
      self.consume();
    };
    let params = match self.func_params() {
      Ok(params) => params,
      Err(_) => {
        self.restore_checkpoint(cp);
        return Ok(None);
      }
    };
    let arrow = self.peek();
    if arrow.typ != TT::EqualsChevronRight || arrow.preceded_by_line_terminator {
      if arrow.typ == TT::EqualsChevronRight {
        return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
      };
      self.restore_checkpoint(cp);
      return Ok(None);
    };
    self.consume();
    self.arrow_func_body(start, async_, params).map(Some)
  }

  fn arrow_func_body(
    &mut self,
    start: Loc,
    async_: bool,
    parameters: Vec<Node<ParamDecl>>,
  ) -> SyntaxResult<Node<Expr>> {
    let body = if self.peek().typ == TT::BraceOpen {
      FuncBody::Block(self.func_body()?)
    } else {
      FuncBody::Expression(self.expr_assign()?)
    };
    let loc = self.loc_from(start);
    let func = Node::new(loc, Func {
      arrow: true,
      async_,
      generator: false,
      parameters,
      body,
    });
    Ok(Node::new(loc, ArrowFuncExpr { func }).into_wrapped())
  }
}
