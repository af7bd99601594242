use ast::node::Node;
use ast::stx::TopLevel;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod token;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer)?;
  parser.parse_top_level()
}

/// Serializes a parsed tree to JSON, mostly useful for debugging tools.
pub fn to_json(top_level: &Node<TopLevel>) -> serde_json::Result<String> {
  serde_json::to_string(top_level)
}
