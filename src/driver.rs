//! The command language of the interactive assistant. Each line of input is
//! tokenized and dispatched to the prover; the reply is returned as text for
//! the caller to show.

use std::fmt::Write;

use thiserror::Error;

use crate::config::Config;
use crate::error::{ParseError, ProofError};
use crate::lexer::tokenize;
use crate::prover::{Mode, TheoremProver};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
  #[error("invalid command")]
  BadCommand,
  #[error("expecting {0}")]
  MissingArgument(&'static str),
  #[error("invalid option number '{0}'")]
  BadIndex(String),
  #[error("no theorem loaded")]
  NoTheorem,
  #[error("the proof is complete")]
  ProofComplete,
  #[error("{0}")]
  Parse(#[from] ParseError),
  #[error("{0}")]
  Proof(#[from] ProofError),
}

pub type Result<T> = std::result::Result<T, DriverError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
  Text(String),
  Quit,
}

#[derive(Debug, Default)]
pub struct Session {
  pub prover: TheoremProver,
}

impl Session {
  pub fn new(config: Config) -> Self { Self { prover: TheoremProver::with_config(config) } }

  /// Runs one line of input.
  pub fn dispatch(&mut self, line: &str) -> Result<Reply> {
    let tokens = tokenize(line);
    let (cmd, args) = match tokens.split_first() {
      Some((cmd, args)) => (cmd.as_str(), args),
      None => return Ok(Reply::Text(String::new())),
    };
    match cmd {
      "quit" | "exit" => return Ok(Reply::Quit),
      "prove" => {
        if args.is_empty() { return Err(DriverError::MissingArgument("theorem")) }
        self.prover.load(&args.join(" "))?;
        return self.goal()
      }
      "just" => {
        self.check_proving()?;
        if args.is_empty() { return Err(DriverError::MissingArgument("justification")) }
        self.prover.justify(args.join(" "))?;
        return self.after_discharge()
      }
      "dec" | "ded" => {
        self.check_proving()?;
        let choice = match args {
          [] => None,
          [n] => Some(parse_choice(n)?),
          _ => return Err(DriverError::BadCommand),
        };
        return if cmd == "dec" { self.decompose(choice) } else { self.deduce(choice) }
      }
      _ => {}
    }
    if !args.is_empty() { return Err(DriverError::BadCommand) }
    match cmd {
      "triv" => {
        self.check_proving()?;
        self.prover.trivial()?;
        self.after_discharge()
      }
      "given" | "givens" => { self.check_proving()?; self.givens() }
      "goal" => { self.check_proving()?; self.goal() }
      "thm" => {
        self.check_theorem()?;
        Ok(Reply::Text(self.prover.theorem().map_or_else(String::new, ToString::to_string)))
      }
      "stat" => { self.check_theorem()?; self.status() }
      _ => Err(DriverError::BadCommand),
    }
  }

  fn check_theorem(&self) -> Result<()> {
    if self.prover.mode() == Mode::NoTheorem { Err(DriverError::NoTheorem) } else { Ok(()) }
  }

  fn check_proving(&self) -> Result<()> {
    match self.prover.mode() {
      Mode::NoTheorem => Err(DriverError::NoTheorem),
      Mode::Done => Err(DriverError::ProofComplete),
      Mode::Proving => Ok(()),
    }
  }

  fn goal(&self) -> Result<Reply> {
    let tp = &self.prover;
    Ok(Reply::Text(match (tp.current(), tp.current_goal()) {
      (Some(n), Some(g)) => format!("[{}] {}", n, g),
      _ => String::new(),
    }))
  }

  fn givens(&self) -> Result<Reply> {
    let givens = self.prover.givens_in_scope();
    if givens.is_empty() { return Ok(Reply::Text("(no givens)".into())) }
    let lines: Vec<String> = givens.iter().map(|(n, g)| format!("[{}] {}", n, g)).collect();
    Ok(Reply::Text(lines.join("\n")))
  }

  fn status(&self) -> Result<Reply> {
    let st = self.prover.status();
    let mode = match self.prover.mode() {
      Mode::Done => "complete",
      _ => "in progress",
    };
    Ok(Reply::Text(format!("proof {}: {} nodes, {} open, {} discharged",
      mode, st.nodes, st.open, st.discharged)))
  }

  fn after_discharge(&self) -> Result<Reply> {
    if self.prover.mode() == Mode::Done {
      Ok(Reply::Text("proof complete".into()))
    } else {
      self.goal()
    }
  }

  fn decompose(&mut self, choice: Option<usize>) -> Result<Reply> {
    match choice {
      None => {
        let options = self.prover.decompositions()?;
        if options.is_empty() { return Err(ProofError::NoOptionsAvailable.into()) }
        Ok(Reply::Text(numbered(options.iter())))
      }
      Some(n) => {
        self.prover.decompose(n)?;
        self.goal()
      }
    }
  }

  fn deduce(&mut self, choice: Option<usize>) -> Result<Reply> {
    match choice {
      None => {
        let options = self.prover.deductions()?;
        if options.is_empty() { return Err(ProofError::NoOptionsAvailable.into()) }
        Ok(Reply::Text(numbered(options.iter())))
      }
      Some(n) => {
        let cur = self.prover.current();
        let fact = self.prover.deduce(n)?;
        let mut out = String::new();
        if let Some(cur) = cur { write!(out, "[{}] ", cur).ok(); }
        write!(out, "{}", fact).ok();
        Ok(Reply::Text(out))
      }
    }
  }
}

/// Options are numbered from 1 for the user.
fn parse_choice(tok: &str) -> Result<usize> {
  match tok.parse::<usize>() {
    Ok(n) if n >= 1 => Ok(n - 1),
    _ => Err(DriverError::BadIndex(tok.to_owned())),
  }
}

fn numbered<T: std::fmt::Display>(options: impl Iterator<Item=T>) -> String {
  let lines: Vec<String> = options.enumerate().map(|(i, o)| format!("{}. {}", i + 1, o)).collect();
  lines.join("\n")
}
