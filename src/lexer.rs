fn is_punct(c: char) -> bool { matches!(c, '(' | ')' | '{' | '}' | ',') }

/// Splits input on whitespace. Parentheses, braces and commas are always
/// tokens of their own, even when glued to other characters.
pub struct Lexer<I> {
  input: I,
  buf: String,
  peek: Option<char>,
}

impl<I: Iterator<Item=char>> Lexer<I> {
  pub fn from(input: I) -> Self {
    let mut lex = Self { input, buf: String::new(), peek: None };
    lex.bump();
    lex
  }

  fn bump(&mut self) -> Option<char> {
    self.peek = self.input.next();
    self.peek
  }

  fn lex_word(&mut self) -> String {
    self.buf.clear();
    while let Some(c) = self.peek {
      if c.is_whitespace() || is_punct(c) { break }
      self.buf.push(c);
      self.bump();
    }
    self.buf.clone()
  }
}

impl<I: Iterator<Item=char>> Iterator for Lexer<I> {
  type Item = String;

  fn next(&mut self) -> Option<String> {
    loop {
      match self.peek? {
        c if c.is_whitespace() => { self.bump(); }
        c if is_punct(c) => { self.bump(); return Some(c.to_string()) }
        _ => return Some(self.lex_word()),
      }
    }
  }
}

pub fn tokenize(line: &str) -> Vec<String> { Lexer::from(line.chars()).collect() }
