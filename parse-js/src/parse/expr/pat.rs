use super::super::Parser;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    let t = self.require(TT::Identifier)?;
    Ok(Node::new(t.loc, IdPat {
      name: self.string(t.loc),
    }))
  }

  /// A declaration pattern that must be a plain identifier, such as an import binding.
  pub fn id_pat_decl(&mut self) -> SyntaxResult<Node<PatDecl>> {
    let id = self.id_pat()?;
    Ok(Node::new(id.loc, PatDecl {
      pat: id.into_wrapped(),
    }))
  }

  pub fn pat_decl(&mut self) -> SyntaxResult<Node<PatDecl>> {
    self.with_loc(|p| Ok(PatDecl { pat: p.pat()? }))
  }

  pub fn pat(&mut self) -> SyntaxResult<Node<Pat>> {
    let t = self.peek();
    match t.typ {
      TT::Identifier => Ok(self.id_pat()?.into_wrapped()),
      TT::BracketOpen => Ok(self.arr_pat()?.into_wrapped()),
      TT::BraceOpen => Ok(self.obj_pat()?.into_wrapped()),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("binding pattern"))),
    }
  }

  fn arr_pat(&mut self) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      loop {
        match p.peek().typ {
          TT::BracketClose => break,
          TT::Comma => {
            p.consume();
            elements.push(None);
            continue;
          }
          TT::DotDotDot => {
            p.consume();
            rest = Some(p.pat()?);
            break;
          }
          _ => {}
        };
        let target = p.pat()?;
        let default_value = p.consume_if(TT::Equals).and_then(|| p.expr_assign())?;
        elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
        if p.peek().typ != TT::BracketClose {
          p.require(TT::Comma)?;
        };
      }
      p.require(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })
  }

  fn obj_pat(&mut self) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BraceClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          break;
        };
        properties.push(p.with_loc(|p| {
          let key = p.class_or_obj_key()?;
          let (target, shorthand) = if p.consume_if(TT::Colon).is_match() {
            (p.pat()?, false)
          } else {
            let target = match &key {
              ClassOrObjKey::Direct(d) if d.stx.tt == TT::Identifier => Node::new(d.loc, IdPat {
                name: d.stx.key.clone(),
              })
              .into_wrapped(),
              _ => return Err(p.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::Colon))),
            };
            (target, true)
          };
          let default_value = p.consume_if(TT::Equals).and_then(|| p.expr_assign())?;
          Ok(ObjPatProp {
            key,
            target,
            shorthand,
            default_value,
          })
        })?);
        if p.peek().typ != TT::BraceClose {
          p.require(TT::Comma)?;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(ObjPat { properties, rest })
    })
  }
}
