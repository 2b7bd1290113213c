use std::convert::TryFrom;

use num::{BigInt, ToPrimitive};
use tracing::trace;

use crate::error::{ParseError, ParseResult};
use crate::lexer::tokenize;
use crate::object::{Object, SymMap, Symbol, SymbolGen};
use crate::sentence::Sentence;
use crate::types::*;

macro_rules! token_table {($($ty:ident),*) => {$(
  impl TryFrom<&str> for $ty {
    type Error = ();
    fn try_from(value: &str) -> Result<Self, Self::Error> {
      $ty::ALL.iter().copied().find(|op| op.token() == value).ok_or(())
    }
  }
)*}}

token_table! { NumOp, SetOp, SpecialSet, LogicOp, Quant }

impl RelOp {
  /// Looks up a relation token, returning the base relation and its
  /// polarity.
  pub fn from_token(value: &str) -> Option<(RelOp, bool)> {
    RelOp::ALL.iter().find_map(|&op| {
      [true, false].iter().copied()
        .find(|&positive| op.token(positive) == value)
        .map(|positive| (op, positive))
    })
  }
}

fn is_int_literal(tok: &str) -> bool {
  let digits = tok.strip_prefix('-').unwrap_or(tok);
  !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit())
}

/// A recursive-descent parser over a token slice. Symbols are resolved in a
/// scope that lives as long as the parser, so one parser should be used per
/// top-level sentence.
pub struct Parser<'a> {
  tokens: &'a [String],
  pos: usize,
  scope: SymMap,
  gen: &'a mut SymbolGen,
}

impl<'a> Parser<'a> {
  pub fn new(tokens: &'a [String], pos: usize, gen: &'a mut SymbolGen) -> Self {
    Self { tokens, pos, scope: SymMap::new(), gen }
  }

  pub fn pos(&self) -> usize { self.pos }

  fn next(&mut self) -> ParseResult<&'a str> {
    let tokens = self.tokens;
    let tk = tokens.get(self.pos).ok_or(ParseError::UnexpectedEnd)?;
    self.pos += 1;
    Ok(tk.as_str())
  }

  fn peek(&self) -> Option<&'a str> { self.tokens.get(self.pos).map(|s| &**s) }

  fn expect(&mut self, tk: &'static str) -> ParseResult<()> {
    if self.next()? == tk { Ok(()) } else { Err(ParseError::Expected(tk)) }
  }

  pub fn sentence(&mut self) -> ParseResult<Sentence> {
    self.expect("(")?;
    let tok = self.next()?;
    let s = if let Ok(op) = LogicOp::try_from(tok) {
      let a = self.sentence()?;
      let b = self.sentence()?;
      Sentence::logical(op, a, b)
    } else if let Some((op, positive)) = RelOp::from_token(tok) {
      let (a, b) = self.relation_args(op)?;
      Sentence::Relation(op, positive, a, b)
    } else if let Ok(q) = Quant::try_from(tok) {
      let name = self.next()?;
      let x = self.symbol(name, true)?;
      if self.peek() == Some("in") {
        self.pos += 1;
        let domain = self.set()?;
        let body = self.sentence()?;
        Sentence::restricted(q, x, domain, body)
      } else {
        let body = self.sentence()?;
        Sentence::quantified(q, x, body)
      }
    } else {
      return Err(ParseError::UnknownOperator(tok.to_owned()))
    };
    self.expect(")")?;
    Ok(s)
  }

  fn relation_args(&mut self, op: RelOp) -> ParseResult<(Object, Object)> {
    match op {
      RelOp::Eq | RelOp::Lt | RelOp::Lte | RelOp::Divides => Ok((self.number()?, self.number()?)),
      RelOp::SetEq | RelOp::Subset | RelOp::ProperSubset => Ok((self.set()?, self.set()?)),
      RelOp::In => Ok((self.object()?, self.set()?)),
    }
  }

  pub fn object(&mut self) -> ParseResult<Object> {
    let tok = self.next()?;
    match tok {
      "(" => {
        let obj = self.compound()?;
        self.expect(")")?;
        Ok(obj)
      }
      "{" => self.set_literal(),
      _ => {
        if let Ok(s) = SpecialSet::try_from(tok) { return Ok(Object::Special(s)) }
        if is_int_literal(tok) {
          return tok.parse::<BigInt>().ok().and_then(|n| n.to_i64())
            .map(Object::Num)
            .ok_or_else(|| ParseError::OutOfRange(tok.to_owned()))
        }
        Ok(Object::Sym(self.symbol(tok, false)?))
      }
    }
  }

  fn compound(&mut self) -> ParseResult<Object> {
    let tok = self.next()?;
    if let Ok(op) = NumOp::try_from(tok) {
      let a = self.number()?;
      let b = self.number()?;
      Ok(Object::num_op(op, a, b))
    } else if let Ok(op) = SetOp::try_from(tok) {
      let a = self.set()?;
      let b = self.set()?;
      Ok(Object::set_op(op, a, b))
    } else {
      Err(ParseError::UnknownOperator(tok.to_owned()))
    }
  }

  // The opening brace has been consumed.
  fn set_literal(&mut self) -> ParseResult<Object> {
    let mut items = vec![];
    if self.peek() == Some("}") {
      self.pos += 1;
      return Ok(Object::Set(items))
    }
    loop {
      items.push(self.object()?);
      match self.next()? {
        "}" => return Ok(Object::Set(items)),
        "," => {}
        _ => return Err(ParseError::SetComma),
      }
    }
  }

  fn number(&mut self) -> ParseResult<Object> {
    let obj = self.object()?;
    if obj.sort().is_number() { Ok(obj) } else { Err(ParseError::ExpectedNumber) }
  }

  fn set(&mut self) -> ParseResult<Object> {
    let obj = self.object()?;
    if obj.sort().is_set() { Ok(obj) } else { Err(ParseError::ExpectedSet) }
  }

  fn symbol(&mut self, tok: &str, fresh: bool) -> ParseResult<Symbol> {
    let mut chars = tok.chars();
    let c = match (chars.next(), chars.next()) {
      (Some(c), None) => c,
      _ => return Err(ParseError::LongSymbol(tok.to_owned())),
    };
    if !c.is_ascii_alphabetic() { return Err(ParseError::BadSymbol(c)) }
    Symbol::resolve(c, &mut self.scope, self.gen, fresh).ok_or(ParseError::SymbolsExhausted)
  }
}

/// Parses one sentence starting at `*pos`, advancing `*pos` past it. On
/// failure nothing is returned and `*pos` is left where it was.
pub fn parse_sentence(tokens: &[String], pos: &mut usize, gen: &mut SymbolGen) -> ParseResult<Sentence> {
  let mut p = Parser::new(tokens, *pos, gen);
  match p.sentence() {
    Ok(s) => { *pos = p.pos(); Ok(s) }
    Err(e) => {
      trace!(start = *pos, at = p.pos(), error = %e, "parse failed");
      Err(e)
    }
  }
}

/// Parses a whole line of text as exactly one sentence.
pub fn parse_str(text: &str, gen: &mut SymbolGen) -> ParseResult<Sentence> {
  let tokens = tokenize(text);
  let mut pos = 0;
  let s = parse_sentence(&tokens, &mut pos, gen)?;
  match tokens.get(pos) {
    Some(tk) => Err(ParseError::Trailing(tk.clone())),
    None => Ok(s),
  }
}
