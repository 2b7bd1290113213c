use std::fmt::{self, Display, Formatter};

use crate::object::{Object, Symbol};
use crate::sentence::{Decomp, Deduct, Sentence, Strategy, Subgoal};
use crate::types::*;

// The surface syntax. The parser's operator tables are built from these, so
// printing and parsing cannot drift apart.

impl NumOp {
  pub const ALL: [NumOp; 3] = [NumOp::Add, NumOp::Sub, NumOp::Mul];
  pub fn token(self) -> &'static str {
    match self {
      NumOp::Add => "+",
      NumOp::Sub => "-",
      NumOp::Mul => "*",
    }
  }
}

impl SetOp {
  pub const ALL: [SetOp; 3] = [SetOp::Union, SetOp::Intersect, SetOp::Diff];
  pub fn token(self) -> &'static str {
    match self {
      SetOp::Union => "union",
      SetOp::Intersect => "intersect",
      SetOp::Diff => "diff",
    }
  }
}

impl SpecialSet {
  pub const ALL: [SpecialSet; 4] =
    [SpecialSet::Empty, SpecialSet::Integers, SpecialSet::Naturals, SpecialSet::Sets];
  pub fn token(self) -> &'static str {
    match self {
      SpecialSet::Empty => "null",
      SpecialSet::Integers => "ZZ",
      SpecialSet::Naturals => "NN",
      SpecialSet::Sets => "SS",
    }
  }
}

impl LogicOp {
  pub const ALL: [LogicOp; 4] = [LogicOp::And, LogicOp::Or, LogicOp::Implies, LogicOp::Iff];
  pub fn token(self) -> &'static str {
    match self {
      LogicOp::And => "and",
      LogicOp::Or => "or",
      LogicOp::Implies => "=>",
      LogicOp::Iff => "iff",
    }
  }
}

impl Quant {
  pub const ALL: [Quant; 2] = [Quant::Forall, Quant::Exists];
  pub fn token(self) -> &'static str {
    match self {
      Quant::Forall => "forall",
      Quant::Exists => "exists",
    }
  }
}

impl RelOp {
  pub const ALL: [RelOp; 8] = [RelOp::Eq, RelOp::Lt, RelOp::Lte, RelOp::SetEq,
    RelOp::Subset, RelOp::ProperSubset, RelOp::In, RelOp::Divides];

  /// The token for the relation with the given polarity. The ordering
  /// relations are written as their complements when negative, so `>=` is
  /// a negative `<`.
  pub fn token(self, positive: bool) -> &'static str {
    match (self, positive) {
      (RelOp::Eq, true) => "=",
      (RelOp::Eq, false) => "!=",
      (RelOp::Lt, true) => "<",
      (RelOp::Lt, false) => ">=",
      (RelOp::Lte, true) => "<=",
      (RelOp::Lte, false) => ">",
      (RelOp::SetEq, true) => "s=",
      (RelOp::SetEq, false) => "s!=",
      (RelOp::ProperSubset, true) => "sub",
      (RelOp::ProperSubset, false) => "supe",
      (RelOp::Subset, true) => "sube",
      (RelOp::Subset, false) => "sup",
      (RelOp::In, true) => "in",
      (RelOp::In, false) => "notin",
      (RelOp::Divides, true) => "div",
      (RelOp::Divides, false) => "notdiv",
    }
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name) }
}

/// Proof tree nodes are labelled `A`..`Z`, then `AA`, `AB`, ...
impl Display for NodeId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut n = self.0 as u64 + 1;
    let mut out = vec![];
    while n > 0 {
      n -= 1;
      out.push((b'A' + (n % 26) as u8) as char);
      n /= 26;
    }
    out.iter().rev().try_for_each(|c| write!(f, "{}", c))
  }
}

fn print_binary(f: &mut Formatter<'_>, op: &str, a: &dyn Display, b: &dyn Display) -> fmt::Result {
  write!(f, "({} {} {})", op, a, b)
}

impl Display for Object {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match *self {
      Object::Num(n) => write!(f, "{}", n),
      Object::NumOp(op, ref a, ref b) => print_binary(f, op.token(), a, b),
      Object::Set(ref items) => {
        write!(f, "{{")?;
        if let Some((first, rest)) = items.split_first() {
          write!(f, "{}", first)?;
          for x in rest { write!(f, ", {}", x)? }
        }
        write!(f, "}}")
      }
      Object::Special(s) => f.write_str(s.token()),
      Object::SetOp(op, ref a, ref b) => print_binary(f, op.token(), a, b),
      Object::Sym(x) => write!(f, "{}", x),
    }
  }
}

impl Display for Sentence {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match *self {
      Sentence::Logical(op, ref a, ref b) => print_binary(f, op.token(), a, b),
      Sentence::Relation(op, positive, ref a, ref b) => print_binary(f, op.token(positive), a, b),
      Sentence::Quantified(q, x, ref body) => write!(f, "({} {} {})", q.token(), x, body),
    }
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Value::False => "false",
      Value::True => "true",
      Value::Unknown => "unknown",
    })
  }
}

impl Display for Strategy {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Strategy::Separate => "separate",
      Strategy::First => "first",
      Strategy::Second => "second",
      Strategy::Direct => "direct",
      Strategy::Contrapositive => "contrapositive",
      Strategy::Bidirectional => "bidirectional",
      Strategy::MutualSubsets => "mutual subsets",
      Strategy::Definition => "definition",
      Strategy::General => "general",
    })
  }
}

impl Display for Subgoal {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if let Some(given) = &self.given { write!(f, "given {}, ", given)? }
    write!(f, "prove {}", self.goal)
  }
}

impl Display for Decomp {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.strategy, self.primary)?;
    if let Some(second) = &self.secondary { write!(f, "; {}", second)? }
    Ok(())
  }
}

impl Display for Deduct {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.hypothesis {
      Some(h) => write!(f, "if {} then {}", h, self.conclusion),
      None => write!(f, "{}", self.conclusion),
    }
  }
}
