use super::decode_string_literal;
use super::number_to_js_string;
use super::parse_number_literal;
use super::Lexer;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::token::TT;

fn types(source: &str) -> Vec<TT> {
  Lexer::new(source)
    .tokenize()
    .unwrap()
    .into_iter()
    .map(|t| t.typ)
    .collect()
}

#[test]
fn test_lex_decorated_class() {
  assert_eq!(types("@dec class A { #x = 1; }"), vec![
    TT::At,
    TT::Identifier,
    TT::KeywordClass,
    TT::Identifier,
    TT::BraceOpen,
    TT::PrivateMember,
    TT::Equals,
    TT::LiteralNumber,
    TT::Semicolon,
    TT::BraceClose,
    TT::EOF,
  ]);
}

#[test]
fn test_lex_longest_punctuator() {
  assert_eq!(types("a >>>= b ?? c?.d"), vec![
    TT::Identifier,
    TT::ChevronRightChevronRightChevronRightEquals,
    TT::Identifier,
    TT::QuestionQuestion,
    TT::Identifier,
    TT::QuestionDot,
    TT::Identifier,
    TT::EOF,
  ]);
  // Conditional followed by a decimal number.
  assert_eq!(types("a?.5:b"), vec![
    TT::Identifier,
    TT::Question,
    TT::LiteralNumber,
    TT::Colon,
    TT::Identifier,
    TT::EOF,
  ]);
}

#[test]
fn test_lex_line_terminators_through_comments() {
  let tokens = Lexer::new("a /* x\n */ b // c\nd").tokenize().unwrap();
  assert!(!tokens[0].preceded_by_line_terminator);
  assert!(tokens[1].preceded_by_line_terminator);
  assert!(tokens[2].preceded_by_line_terminator);
  assert_eq!(tokens[2].loc, Loc(18, 19));
}

#[test]
fn test_lex_errors() {
  let err = Lexer::new("'abc\n'").tokenize().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorInString);
  let err = Lexer::new("`tpl`").tokenize().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnsupportedSyntax("template literal"));
  let err = Lexer::new("/* open").tokenize().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);
  let err = Lexer::new("3in x").tokenize().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::MalformedLiteralNumber);
}

#[test]
fn test_number_literals() {
  assert_eq!(parse_number_literal("0x1F"), Some(31.0));
  assert_eq!(parse_number_literal("0b101"), Some(5.0));
  assert_eq!(parse_number_literal("1_000"), Some(1000.0));
  assert_eq!(parse_number_literal("1.5e2"), Some(150.0));
  assert_eq!(parse_number_literal(".5"), Some(0.5));
  assert_eq!(parse_number_literal("0x"), None);
}

#[test]
fn test_string_literals() {
  let loc = Loc(0, 0);
  assert_eq!(decode_string_literal(r#""a\nb""#, loc).unwrap(), "a\nb");
  assert_eq!(decode_string_literal(r"'\x41B\u{43}'", loc).unwrap(), "ABC");
  assert_eq!(decode_string_literal(r#"'it\'s'"#, loc).unwrap(), "it's");
  assert_eq!(decode_string_literal("'a\\\nb'", loc).unwrap(), "ab");
  assert!(decode_string_literal(r"'\xZZ'", loc).is_err());
}

#[test]
fn test_number_to_js_string() {
  assert_eq!(number_to_js_string(0.0), "0");
  assert_eq!(number_to_js_string(-0.0), "0");
  assert_eq!(number_to_js_string(42.0), "42");
  assert_eq!(number_to_js_string(1.5), "1.5");
  assert_eq!(number_to_js_string(0.000001), "0.000001");
  assert_eq!(number_to_js_string(1e-7), "1e-7");
  assert_eq!(number_to_js_string(1.25e-7), "1.25e-7");
  assert_eq!(number_to_js_string(1e20), "100000000000000000000");
  assert_eq!(number_to_js_string(1e21), "1e+21");
  assert_eq!(number_to_js_string(1.5e300), "1.5e+300");
  assert_eq!(number_to_js_string(-2.5), "-2.5");
  assert_eq!(number_to_js_string(f64::INFINITY), "Infinity");
  assert_eq!(number_to_js_string(f64::NAN), "NaN");
}
