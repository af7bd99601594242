// Identifier classification works on bytes. Any non-ASCII byte is accepted as
// part of an identifier, which lets UTF-8 encoded identifiers through without a
// full Unicode ID_Start/ID_Continue table.

pub fn is_id_start(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'$' || c == b'_' || c >= 0x80
}

pub fn is_id_continue(c: u8) -> bool {
  is_id_start(c) || c.is_ascii_digit()
}

pub fn is_line_terminator(c: u8) -> bool {
  c == b'\n' || c == b'\r'
}

pub fn is_whitespace(c: u8) -> bool {
  matches!(c, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Whether `name` could be written as a bare identifier (ignoring reserved words).
pub fn is_valid_identifier(name: &str) -> bool {
  let mut bytes = name.bytes();
  match bytes.next() {
    Some(c) if is_id_start(c) => bytes.all(is_id_continue),
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identifier_validity() {
    assert!(is_valid_identifier("_default"));
    assert!(is_valid_identifier("$a1"));
    assert!(!is_valid_identifier("1a"));
    assert!(!is_valid_identifier("a-b"));
    assert!(!is_valid_identifier(""));
  }
}
