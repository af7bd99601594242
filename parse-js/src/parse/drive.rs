use super::Parser;
use crate::ast::node::Node;
use crate::error::SyntaxResult;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

impl<'a> Parser<'a> {
  pub fn with_loc<S: Drive + DriveMut, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.checkpoint();
    let stx = f(self)?;
    Ok(Node::new(self.since_checkpoint(&start), stx))
  }

  /// Repeatedly calls `f` until the next token is `end` (which is not consumed).
  pub fn repeat_until_tt<S, F>(&mut self, end: TT, mut f: F) -> SyntaxResult<Vec<S>>
  where
    F: FnMut(&mut Self) -> SyntaxResult<S>,
  {
    let mut nodes = Vec::new();
    while self.peek().typ != end && self.peek().typ != TT::EOF {
      nodes.push(f(self)?);
    }
    Ok(nodes)
  }

  /// Parses `f` separated by commas (trailing comma allowed) until `end`, then consumes `end`.
  pub fn list_until_tt<S, F>(&mut self, end: TT, mut f: F) -> SyntaxResult<Vec<S>>
  where
    F: FnMut(&mut Self) -> SyntaxResult<S>,
  {
    let mut nodes = Vec::new();
    while self.peek().typ != end {
      nodes.push(f(self)?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    self.require(end)?;
    Ok(nodes)
  }
}
