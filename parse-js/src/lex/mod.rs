use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::is_whitespace;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use aho_corasick::AhoCorasick;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use memchr::memchr2;
use memchr::memmem;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.source[loc.0..loc.1]
  }

  fn bytes(&self) -> &'a [u8] {
    self.source.as_bytes()
  }

  fn peek_byte(&self, n: usize) -> Option<u8> {
    self.bytes().get(self.next + n).copied()
  }

  fn skip_while(&mut self, pred: impl Fn(u8) -> bool) {
    while self.peek_byte(0).is_some_and(&pred) {
      self.next += 1;
    }
  }

  /// Skips whitespace and comments, returning whether a line terminator was crossed.
  fn skip_insignificant(&mut self) -> SyntaxResult<bool> {
    let mut saw_line_terminator = false;
    loop {
      match (self.peek_byte(0), self.peek_byte(1)) {
        (Some(c), _) if is_whitespace(c) => {
          saw_line_terminator |= is_line_terminator(c);
          self.next += 1;
        }
        (Some(b'/'), Some(b'/')) => {
          let rest = &self.bytes()[self.next..];
          self.next += memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
        }
        (Some(b'/'), Some(b'*')) => {
          let start = self.next;
          let rest = &self.bytes()[self.next + 2..];
          let Some(end) = memmem::find(rest, b"*/") else {
            return Err(
              Loc(start, self.source.len()).error(SyntaxErrorType::UnexpectedEnd, None),
            );
          };
          saw_line_terminator |= memchr2(b'\n', b'\r', &rest[..end]).is_some();
          self.next += 2 + end + 2;
        }
        _ => return Ok(saw_line_terminator),
      }
    }
  }

  pub fn next_token(&mut self) -> SyntaxResult<Token> {
    let preceded_by_line_terminator = self.skip_insignificant()?;
    let start = self.next;
    let typ = match self.peek_byte(0) {
      None => TT::EOF,
      Some(b'"' | b'\'') => self.lex_string()?,
      Some(c) if c.is_ascii_digit() => self.lex_number()?,
      Some(b'.') if self.peek_byte(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number()?,
      Some(c) if is_id_start(c) => self.lex_identifier(),
      Some(b'#') if self.peek_byte(1).is_some_and(is_id_start) => {
        self.next += 1;
        self.skip_while(is_id_continue);
        TT::PrivateMember
      }
      Some(b'`') => {
        return Err(
          Loc(start, start + 1).error(SyntaxErrorType::UnsupportedSyntax("template literal"), None),
        )
      }
      Some(_) => self.lex_punctuator()?,
    };
    Ok(Token {
      loc: Loc(start, self.next),
      preceded_by_line_terminator,
      typ,
    })
  }

  /// Lexes the entire source. The last token is always `TT::EOF`.
  pub fn tokenize(&mut self) -> SyntaxResult<Vec<Token>> {
    let mut tokens = Vec::new();
    loop {
      let t = self.next_token()?;
      tokens.push(t);
      if t.typ == TT::EOF {
        break;
      };
    }
    Ok(tokens)
  }

  fn lex_identifier(&mut self) -> TT {
    let start = self.next;
    self.skip_while(is_id_continue);
    let raw = &self.bytes()[start..self.next];
    KEYWORD_STRS.get(raw).copied().unwrap_or(TT::Identifier)
  }

  fn lex_punctuator(&mut self) -> SyntaxResult<TT> {
    let start = self.next;
    let input = Input::new(&self.bytes()[start..]).anchored(Anchored::Yes);
    let Some(m) = PUNCTUATORS.matcher.find(input) else {
      return Err(Loc(start, start + 1).error(SyntaxErrorType::ExpectedSyntax("token"), None));
    };
    let mut typ = PUNCTUATORS.types[m.pattern().as_usize()];
    let mut len = m.end();
    // `a?.5:b` is a conditional, not optional chaining.
    if typ == TT::QuestionDot && self.peek_byte(2).is_some_and(|c| c.is_ascii_digit()) {
      typ = TT::Question;
      len = 1;
    };
    self.next += len;
    Ok(typ)
  }

  fn lex_number(&mut self) -> SyntaxResult<TT> {
    let start = self.next;
    let radix_prefix = matches!(
      (self.peek_byte(0), self.peek_byte(1)),
      (Some(b'0'), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O'))
    );
    if radix_prefix {
      self.next += 2;
      self.skip_while(|c| c.is_ascii_hexdigit() || c == b'_');
    } else {
      self.skip_while(|c| c.is_ascii_digit() || c == b'_');
      if self.peek_byte(0) == Some(b'.') {
        self.next += 1;
        self.skip_while(|c| c.is_ascii_digit() || c == b'_');
      };
      if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
        self.next += 1;
        if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
          self.next += 1;
        };
        self.skip_while(|c| c.is_ascii_digit());
      };
    };
    match self.peek_byte(0) {
      Some(b'n') => Err(
        Loc(start, self.next + 1).error(SyntaxErrorType::UnsupportedSyntax("bigint literal"), None),
      ),
      Some(c) if is_id_start(c) => Err(
        Loc(start, self.next + 1).error(SyntaxErrorType::MalformedLiteralNumber, None),
      ),
      _ => Ok(TT::LiteralNumber),
    }
  }

  fn lex_string(&mut self) -> SyntaxResult<TT> {
    let start = self.next;
    let Some(quote) = self.peek_byte(0) else {
      return Err(Loc(start, start).error(SyntaxErrorType::UnexpectedEnd, None));
    };
    self.next += 1;
    loop {
      match self.peek_byte(0) {
        None => {
          return Err(Loc(start, self.next).error(SyntaxErrorType::UnexpectedEnd, None));
        }
        Some(b'\\') => {
          // Line continuations are valid, so any escaped byte is skipped including CR/LF.
          self.next += 2;
        }
        Some(c) if is_line_terminator(c) => {
          return Err(Loc(start, self.next).error(SyntaxErrorType::LineTerminatorInString, None));
        }
        Some(c) => {
          self.next += 1;
          if c == quote {
            break;
          };
        }
      };
    }
    Ok(TT::LiteralString)
  }
}

struct PatternMatcher {
  matcher: AhoCorasick,
  types: Vec<TT>,
}

impl PatternMatcher {
  fn new(patterns: &[(TT, &'static str)]) -> PatternMatcher {
    let matcher = AhoCorasick::builder()
      .match_kind(MatchKind::LeftmostLongest)
      .start_kind(StartKind::Anchored)
      .build(patterns.iter().map(|(_, p)| p.as_bytes()))
      .expect("punctuator patterns are valid");
    PatternMatcher {
      matcher,
      types: patterns.iter().map(|(tt, _)| *tt).collect(),
    }
  }
}

#[rustfmt::skip]
static PUNCTUATORS: Lazy<PatternMatcher> = Lazy::new(|| PatternMatcher::new(&[
  (TT::Ampersand, "&"),
  (TT::AmpersandAmpersand, "&&"),
  (TT::AmpersandAmpersandEquals, "&&="),
  (TT::AmpersandEquals, "&="),
  (TT::Asterisk, "*"),
  (TT::AsteriskAsterisk, "**"),
  (TT::AsteriskAsteriskEquals, "**="),
  (TT::AsteriskEquals, "*="),
  (TT::At, "@"),
  (TT::Bar, "|"),
  (TT::BarBar, "||"),
  (TT::BarBarEquals, "||="),
  (TT::BarEquals, "|="),
  (TT::BraceClose, "}"),
  (TT::BraceOpen, "{"),
  (TT::BracketClose, "]"),
  (TT::BracketOpen, "["),
  (TT::Caret, "^"),
  (TT::CaretEquals, "^="),
  (TT::ChevronLeft, "<"),
  (TT::ChevronLeftChevronLeft, "<<"),
  (TT::ChevronLeftChevronLeftEquals, "<<="),
  (TT::ChevronLeftEquals, "<="),
  (TT::ChevronRight, ">"),
  (TT::ChevronRightChevronRight, ">>"),
  (TT::ChevronRightChevronRightChevronRight, ">>>"),
  (TT::ChevronRightChevronRightChevronRightEquals, ">>>="),
  (TT::ChevronRightChevronRightEquals, ">>="),
  (TT::ChevronRightEquals, ">="),
  (TT::Colon, ":"),
  (TT::Comma, ","),
  (TT::Dot, "."),
  (TT::DotDotDot, "..."),
  (TT::Equals, "="),
  (TT::EqualsChevronRight, "=>"),
  (TT::EqualsEquals, "=="),
  (TT::EqualsEqualsEquals, "==="),
  (TT::Exclamation, "!"),
  (TT::ExclamationEquals, "!="),
  (TT::ExclamationEqualsEquals, "!=="),
  (TT::Hyphen, "-"),
  (TT::HyphenEquals, "-="),
  (TT::HyphenHyphen, "--"),
  (TT::ParenthesisClose, ")"),
  (TT::ParenthesisOpen, "("),
  (TT::Percent, "%"),
  (TT::PercentEquals, "%="),
  (TT::Plus, "+"),
  (TT::PlusEquals, "+="),
  (TT::PlusPlus, "++"),
  (TT::Question, "?"),
  (TT::QuestionDot, "?."),
  (TT::QuestionQuestion, "??"),
  (TT::QuestionQuestionEquals, "??="),
  (TT::Semicolon, ";"),
  (TT::Slash, "/"),
  (TT::SlashEquals, "/="),
  (TT::Tilde, "~"),
]));

#[rustfmt::skip]
pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::<TT, &'static str>::new();
  map.insert(TT::KeywordBreak, "break");
  map.insert(TT::KeywordCase, "case");
  map.insert(TT::KeywordCatch, "catch");
  map.insert(TT::KeywordClass, "class");
  map.insert(TT::KeywordConst, "const");
  map.insert(TT::KeywordContinue, "continue");
  map.insert(TT::KeywordDebugger, "debugger");
  map.insert(TT::KeywordDefault, "default");
  map.insert(TT::KeywordDelete, "delete");
  map.insert(TT::KeywordDo, "do");
  map.insert(TT::KeywordElse, "else");
  map.insert(TT::KeywordExport, "export");
  map.insert(TT::KeywordExtends, "extends");
  map.insert(TT::KeywordFinally, "finally");
  map.insert(TT::KeywordFor, "for");
  map.insert(TT::KeywordFunction, "function");
  map.insert(TT::KeywordIf, "if");
  map.insert(TT::KeywordImport, "import");
  map.insert(TT::KeywordIn, "in");
  map.insert(TT::KeywordInstanceof, "instanceof");
  map.insert(TT::KeywordNew, "new");
  map.insert(TT::KeywordReturn, "return");
  map.insert(TT::KeywordSuper, "super");
  map.insert(TT::KeywordSwitch, "switch");
  map.insert(TT::KeywordThis, "this");
  map.insert(TT::KeywordThrow, "throw");
  map.insert(TT::KeywordTry, "try");
  map.insert(TT::KeywordTypeof, "typeof");
  map.insert(TT::KeywordVar, "var");
  map.insert(TT::KeywordVoid, "void");
  map.insert(TT::KeywordWhile, "while");
  map.insert(TT::KeywordWith, "with");
  map.insert(TT::LiteralFalse, "false");
  map.insert(TT::LiteralNull, "null");
  map.insert(TT::LiteralTrue, "true");
  map
});

pub static KEYWORD_STRS: Lazy<HashMap<&'static [u8], TT>> = Lazy::new(|| {
  KEYWORDS_MAPPING
    .iter()
    .map(|(&tt, &s)| (s.as_bytes(), tt))
    .collect()
});

/// Parses the raw text of a `TT::LiteralNumber` token.
pub fn parse_number_literal(raw: &str) -> Option<f64> {
  let cleaned = raw.replace('_', "");
  let radix = match cleaned.get(..2) {
    Some("0x" | "0X") => 16,
    Some("0b" | "0B") => 2,
    Some("0o" | "0O") => 8,
    _ => return cleaned.parse::<f64>().ok(),
  };
  let digits = &cleaned[2..];
  if digits.is_empty() {
    return None;
  };
  digits.chars().try_fold(0f64, |acc, c| {
    c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
  })
}

/// `Number.prototype.toString()`, which is also how a numeric key becomes a property name.
pub fn number_to_js_string(value: f64) -> String {
  if value.is_nan() {
    return "NaN".to_string();
  };
  if value == 0.0 {
    return "0".to_string();
  };
  if value.is_infinite() {
    return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
  };
  if value < 0.0 {
    return format!("-{}", number_to_js_string(-value));
  };
  // Shortest round-trip digits, then laid out with the decimal point position `n`.
  let sci = format!("{value:e}");
  let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
  let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
  let k = digits.len() as i32;
  let n = exp.parse::<i32>().unwrap_or(0) + 1;
  if k <= n && n <= 21 {
    format!("{digits}{}", "0".repeat((n - k) as usize))
  } else if 0 < n && n <= 21 {
    let (int, frac) = digits.split_at(n as usize);
    format!("{int}.{frac}")
  } else if -6 < n && n <= 0 {
    format!("0.{}{digits}", "0".repeat((-n) as usize))
  } else {
    let e = n - 1;
    let sign = if e >= 0 { '+' } else { '-' };
    let (first, rest) = digits.split_at(1);
    if rest.is_empty() {
      format!("{first}e{sign}{}", e.abs())
    } else {
      format!("{first}.{rest}e{sign}{}", e.abs())
    }
  }
}

/// Decodes the raw text of a `TT::LiteralString` token, including its quotes.
pub fn decode_string_literal(raw: &str, loc: Loc) -> SyntaxResult<String> {
  let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or("");
  let mut out = String::with_capacity(inner.len());
  let mut chars = inner.chars().peekable();
  let invalid = || loc.error(SyntaxErrorType::InvalidCharacterEscape, None);
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    };
    let Some(e) = chars.next() else {
      return Err(invalid());
    };
    let next_is_digit = chars.peek().is_some_and(|c| c.is_ascii_digit());
    match e {
      'n' => out.push('\n'),
      't' => out.push('\t'),
      'r' => out.push('\r'),
      'b' => out.push('\u{8}'),
      'f' => out.push('\u{c}'),
      'v' => out.push('\u{b}'),
      '0' if !next_is_digit => out.push('\0'),
      // Line continuation.
      '\r' => {
        chars.next_if_eq(&'\n');
      }
      '\n' => {}
      'x' => {
        let hex: String = chars.by_ref().take(2).collect();
        let cp = u32::from_str_radix(&hex, 16).map_err(|_| invalid())?;
        out.push(char::from_u32(cp).ok_or_else(invalid)?);
      }
      'u' => {
        let hex: String = if chars.next_if_eq(&'{').is_some() {
          chars.by_ref().take_while(|c| *c != '}').collect()
        } else {
          chars.by_ref().take(4).collect()
        };
        let cp = u32::from_str_radix(&hex, 16).map_err(|_| invalid())?;
        // Lone surrogates cannot be represented in a Rust string.
        out.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
      }
      c if c.is_ascii_digit() => return Err(invalid()),
      c => out.push(c),
    };
  }
  Ok(out)
}
