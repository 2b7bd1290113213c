use thiserror::Error;

use crate::prover::Mode;

/// Why a piece of input text failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("unexpected end of input")]
  UnexpectedEnd,

  #[error("expected '{0}'")]
  Expected(&'static str),

  #[error("unknown operator '{0}'")]
  UnknownOperator(String),

  #[error("symbols can only be one character long: '{0}'")]
  LongSymbol(String),

  #[error("invalid symbol character '{0}'")]
  BadSymbol(char),

  #[error("integer out of range: {0}")]
  OutOfRange(String),

  #[error("expected object to be a number")]
  ExpectedNumber,

  #[error("expected object to be a set")]
  ExpectedSet,

  #[error("expected comma in set")]
  SetComma,

  #[error("unexpected token after sentence: '{0}'")]
  Trailing(String),

  #[error("ran out of symbol identifiers")]
  SymbolsExhausted,
}

/// A command the proof engine refused. The engine state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
  #[error("operation not available in mode {0:?}")]
  WrongMode(Mode),

  #[error("the current goal has already been decomposed")]
  AlreadyDecomposed,

  #[error("no options available")]
  NoOptionsAvailable,

  #[error("ran out of symbol identifiers")]
  SymbolsExhausted,

  #[error("choice {choice} is out of range (there are {count} options)")]
  ChoiceOutOfRange { choice: usize, count: usize },
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
pub type ProofResult<T> = std::result::Result<T, ProofError>;
