use super::Parser;
use crate::ast::class_or_object::AccessorKind;
use crate::ast::class_or_object::ClassAccessor;
use crate::ast::class_or_object::ClassField;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassMethod;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassStaticBlock;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Decorator;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::decode_string_literal;
use crate::lex::number_to_js_string;
use crate::lex::parse_number_literal;
use crate::lex::KEYWORDS_MAPPING;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn class_or_obj_key(&mut self) -> SyntaxResult<ClassOrObjKey> {
    let t = self.peek();
    if t.typ == TT::BracketOpen {
      self.consume();
      let expr = self.expr_assign()?;
      self.require(TT::BracketClose)?;
      return Ok(ClassOrObjKey::Computed(expr));
    };
    let key = match t.typ {
      TT::LiteralString => decode_string_literal(self.str(t.loc), t.loc)?,
      TT::LiteralNumber => parse_number_literal(self.str(t.loc))
        .map(number_to_js_string)
        .ok_or_else(|| t.error(SyntaxErrorType::MalformedLiteralNumber))?,
      TT::Identifier | TT::PrivateMember => self.string(t.loc),
      typ if KEYWORDS_MAPPING.contains_key(&typ) => self.string(t.loc),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("property key"))),
    };
    self.consume();
    Ok(ClassOrObjKey::Direct(Node::new(t.loc, ClassOrObjMemberDirectKey {
      key,
      tt: t.typ,
    })))
  }

  /// Zero or more `@expr` decorators.
  pub fn decorators(&mut self) -> SyntaxResult<Vec<Node<Decorator>>> {
    let mut decorators = Vec::new();
    while self.peek().typ == TT::At {
      decorators.push(self.with_loc(|p| {
        p.require(TT::At)?;
        Ok(Decorator {
          expression: p.decorator_expr()?,
        })
      })?);
    }
    Ok(decorators)
  }

  // Either a parenthesised expression, or an identifier path with an optional trailing call.
  fn decorator_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    if self.peek().typ == TT::ParenthesisOpen {
      self.consume();
      let expr = self.expr()?;
      self.require(TT::ParenthesisClose)?;
      return Ok(expr);
    };
    let t = self.require(TT::Identifier)?;
    let mut expr: Node<Expr> = Node::new(t.loc, IdExpr {
      name: self.string(t.loc),
    })
    .into_wrapped();
    while self.consume_if(TT::Dot).is_match() {
      let right = self.member_name()?;
      expr = Node::new(self.loc_from(expr.loc), MemberExpr {
        optional_chaining: false,
        left: expr,
        right,
      })
      .into_wrapped();
    }
    if self.peek().typ == TT::ParenthesisOpen {
      let arguments = self.call_args()?;
      expr = Node::new(self.loc_from(expr.loc), CallExpr {
        optional_chaining: false,
        callee: expr,
        arguments,
      })
      .into_wrapped();
    };
    Ok(expr)
  }

  pub fn class_body(&mut self) -> SyntaxResult<Vec<ClassMember>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    while self.peek().typ != TT::BraceClose {
      if self.consume_if(TT::Semicolon).is_match() {
        continue;
      };
      members.push(self.class_member()?);
    }
    self.require(TT::BraceClose)?;
    Ok(members)
  }

  fn is_class_modifier(&self, name: &str) -> bool {
    let (t0, t1) = self.peek_2();
    self.is_contextual(t0, name)
      && !matches!(
        t1.typ,
        TT::ParenthesisOpen | TT::Equals | TT::Semicolon | TT::BraceClose | TT::EOF
      )
      && (name == "static" || !t1.preceded_by_line_terminator)
  }

  fn class_member(&mut self) -> SyntaxResult<ClassMember> {
    let start = self.checkpoint();
    let decorators = self.decorators()?;

    let static_ = self.is_class_modifier("static");
    if static_ {
      self.consume();
      if self.peek().typ == TT::BraceOpen {
        if let Some(d) = decorators.first() {
          return Err(d.error(SyntaxErrorType::ExpectedSyntax("decoratable class member")));
        };
        let body = self.func_body()?;
        return Ok(Node::new(self.since_checkpoint(&start), ClassStaticBlock { body }).into());
      };
    };
    let accessor = self.is_class_modifier("accessor");
    if accessor {
      self.consume();
    };
    let async_ = !accessor && self.is_class_modifier("async");
    if async_ {
      self.consume();
    };
    let generator = !accessor && self.consume_if(TT::Asterisk).is_match();
    let mut kind = None;
    if !accessor && !async_ && !generator {
      if self.is_class_modifier("get") {
        self.consume();
        kind = Some(AccessorKind::Getter);
      } else if self.is_class_modifier("set") {
        self.consume();
        kind = Some(AccessorKind::Setter);
      };
    };

    let key = self.class_or_obj_key()?;
    if !accessor && self.peek().typ == TT::ParenthesisOpen {
      let func = self.method_func(async_, generator)?;
      let loc = self.since_checkpoint(&start);
      return Ok(match kind {
        Some(kind) => Node::new(loc, ClassAccessor {
          decorators,
          key,
          static_,
          kind,
          func,
        })
        .into(),
        None => Node::new(loc, ClassMethod {
          decorators,
          key,
          static_,
          func,
        })
        .into(),
      });
    };
    if async_ || generator || kind.is_some() {
      return Err(self.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisOpen)));
    };
    let value = self.consume_if(TT::Equals).and_then(|| self.expr_assign())?;
    self.require_semicolon_or_asi()?;
    Ok(Node::new(self.since_checkpoint(&start), ClassField {
      decorators,
      key,
      static_,
      accessor,
      value,
    })
    .into())
  }

  pub fn class_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self
      .with_loc(|p| {
        let decorators = p.decorators()?;
        p.require(TT::KeywordClass)?;
        let name = p.class_or_func_name();
        let extends = p.consume_if(TT::KeywordExtends).and_then(|| p.lhs_expr())?;
        let members = p.class_body()?;
        Ok(ClassExpr {
          decorators,
          name,
          extends,
          members,
        })
      })
      .map(|node| node.into_wrapped())
  }
}
