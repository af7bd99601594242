use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let body = self.repeat_until_tt(TT::EOF, |p| p.stmt())?;
    let end = self.require(TT::EOF)?;
    Ok(Node::new(Loc(0, end.loc.1), TopLevel { body }))
  }
}
