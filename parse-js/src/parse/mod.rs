use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod class_or_object;
pub mod drive;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod operator;
pub mod stmt;
pub mod top_level;

#[cfg(test)]
mod tests;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }

  pub fn and_then<R, F: FnOnce() -> SyntaxResult<R>>(self, f: F) -> SyntaxResult<Option<R>> {
    Ok(if self.matched { Some(f()?) } else { None })
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  // The lexer has no context-dependent modes for the syntax we accept, so the whole file is lexed upfront and checkpoints are just indices.
  tokens: Vec<Token>,
  next_tok_i: usize,
}

// We extend this struct with added methods in the various submodules, instead of simply using free functions and passing `&mut Parser` around, for several reasons:
// - Avoid needing to redeclare `<'a>` on every function.
// - More lifetime elision is available for `self` than if it was just another reference parameter.
// - Don't need to import each function.
// - For general consistency; if there's no reason why it should be a free function (e.g. more than one ambiguous base type), it should be a method.
impl<'a> Parser<'a> {
  pub fn new(mut lexer: Lexer<'a>) -> SyntaxResult<Parser<'a>> {
    let tokens = lexer.tokenize()?;
    Ok(Parser {
      lexer,
      tokens,
      next_tok_i: 0,
    })
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    self.lexer.str(loc)
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
    }
  }

  /// The location spanning every token consumed since `checkpoint`.
  pub fn since_checkpoint(&self, checkpoint: &ParserCheckpoint) -> Loc {
    let start = self.tokens[checkpoint.next_tok_i.min(self.tokens.len() - 1)].loc.0;
    Loc(start, self.prev_end().max(start))
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
  }

  /// End offset of the most recently consumed token.
  pub fn prev_end(&self) -> usize {
    match self.next_tok_i {
      0 => 0,
      i => self.tokens[i - 1].loc.1,
    }
  }

  /// Location from the start of `start` to the end of the last consumed token.
  pub fn loc_from(&self, start: Loc) -> Loc {
    Loc(start.0, self.prev_end().max(start.1))
  }

  pub fn peek_n(&self, n: usize) -> Token {
    // The last token is always EOF, so peeking past the end keeps returning it.
    let i = (self.next_tok_i + n).min(self.tokens.len() - 1);
    self.tokens[i]
  }

  pub fn peek(&self) -> Token {
    self.peek_n(0)
  }

  pub fn peek_2(&self) -> (Token, Token) {
    (self.peek_n(0), self.peek_n(1))
  }

  pub fn peek_3(&self) -> (Token, Token, Token) {
    (self.peek_n(0), self.peek_n(1), self.peek_n(2))
  }

  pub fn consume(&mut self) -> Token {
    let t = self.peek();
    if t.typ != TT::EOF {
      self.next_tok_i += 1;
    };
    t
  }

  pub fn consume_as_string(&mut self) -> String {
    let loc = self.consume().loc;
    self.string(loc)
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let t = self.peek();
    let matched = t.typ == typ;
    if matched {
      self.consume();
    };
    MaybeToken {
      typ: t.typ,
      loc: t.loc,
      matched,
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.peek();
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(self.consume())
    }
  }

  /// Whether `t` is the contextual keyword `name` (e.g. `async`, `static`, `from`), which the lexer emits as an identifier.
  pub fn is_contextual(&self, t: Token, name: &str) -> bool {
    t.typ == TT::Identifier && self.str(t.loc) == name
  }

  pub fn require_contextual(&mut self, name: &'static str) -> SyntaxResult<Token> {
    let t = self.peek();
    if self.is_contextual(t, name) {
      Ok(self.consume())
    } else {
      Err(t.error(SyntaxErrorType::ExpectedSyntax(name)))
    }
  }

  /// Statement terminator: an explicit `;`, or automatic semicolon insertion before `}`, EOF, or a line terminator.
  pub fn require_semicolon_or_asi(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    if t.typ == TT::Semicolon {
      self.consume();
      return Ok(());
    };
    if t.typ == TT::BraceClose || t.typ == TT::EOF || t.preceded_by_line_terminator {
      return Ok(());
    };
    Err(t.error(SyntaxErrorType::ExpectedSyntax("`;` or line terminator")))
  }
}
