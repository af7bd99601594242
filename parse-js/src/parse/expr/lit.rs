use super::super::Parser;
use crate::ast::class_or_object::AccessorKind;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::decode_string_literal;
use crate::lex::parse_number_literal;
use crate::token::Token;
use crate::token::TT;

// A modifier such as `get` or `async` is only a modifier if a property key follows it.
fn starts_key(t: Token) -> bool {
  !matches!(
    t.typ,
    TT::ParenthesisOpen | TT::Comma | TT::Colon | TT::BraceClose | TT::Equals | TT::EOF
  )
}

impl<'a> Parser<'a> {
  pub fn lit(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.consume();
    Ok(match t.typ {
      TT::LiteralNull => Node::new(t.loc, LitNullExpr {}).into_wrapped(),
      TT::LiteralTrue | TT::LiteralFalse => Node::new(t.loc, LitBoolExpr {
        value: t.typ == TT::LiteralTrue,
      })
      .into_wrapped(),
      TT::LiteralNumber => {
        let value = parse_number_literal(self.str(t.loc))
          .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?;
        Node::new(t.loc, LitNumExpr { value }).into_wrapped()
      }
      TT::LiteralString => {
        let value = decode_string_literal(self.str(t.loc), t.loc)?;
        Node::new(t.loc, LitStrExpr { value }).into_wrapped()
      }
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("literal"))),
    })
  }

  pub fn lit_arr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::BracketOpen)?;
    let mut elements = Vec::new();
    loop {
      match self.peek().typ {
        TT::BracketClose => break,
        TT::Comma => {
          self.consume();
          elements.push(LitArrElem::Empty);
          continue;
        }
        TT::DotDotDot => {
          self.consume();
          elements.push(LitArrElem::Rest(self.expr_assign()?));
        }
        _ => elements.push(LitArrElem::Single(self.expr_assign()?)),
      };
      if self.peek().typ != TT::BracketClose {
        self.require(TT::Comma)?;
      };
    }
    self.require(TT::BracketClose)?;
    Ok(Node::new(self.loc_from(start.loc), LitArrExpr { elements }).into_wrapped())
  }

  pub fn lit_obj(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::BraceOpen)?;
    let members = self.list_until_tt(TT::BraceClose, |p| {
      p.with_loc(|p| {
        Ok(ObjMember {
          typ: p.obj_member_type()?,
        })
      })
    })?;
    Ok(Node::new(self.loc_from(start.loc), LitObjExpr { members }).into_wrapped())
  }

  fn obj_member_type(&mut self) -> SyntaxResult<ObjMemberType> {
    let (t0, t1) = self.peek_2();
    if t0.typ == TT::DotDotDot {
      self.consume();
      return Ok(ObjMemberType::Rest {
        val: self.expr_assign()?,
      });
    };

    let mut async_ = false;
    let mut accessor = None;
    if self.is_contextual(t0, "async") && starts_key(t1) && !t1.preceded_by_line_terminator {
      self.consume();
      async_ = true;
    } else if self.is_contextual(t0, "get") && starts_key(t1) {
      self.consume();
      accessor = Some(AccessorKind::Getter);
    } else if self.is_contextual(t0, "set") && starts_key(t1) {
      self.consume();
      accessor = Some(AccessorKind::Setter);
    };
    let generator = accessor.is_none() && self.consume_if(TT::Asterisk).is_match();

    let key = self.class_or_obj_key()?;
    if async_ || generator || accessor.is_some() || self.peek().typ == TT::ParenthesisOpen {
      let func = self.method_func(async_, generator)?;
      return Ok(ObjMemberType::Method {
        key,
        accessor,
        func,
      });
    };
    if self.consume_if(TT::Colon).is_match() {
      return Ok(ObjMemberType::Valued {
        key,
        val: self.expr_assign()?,
      });
    };
    match key {
      ClassOrObjKey::Direct(d) if d.stx.tt == TT::Identifier => {
        let loc = d.loc;
        Ok(ObjMemberType::Shorthand {
          id: Node::new(loc, IdPat { name: d.stx.key }),
        })
      }
      _ => Err(self.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::Colon))),
    }
  }
}
