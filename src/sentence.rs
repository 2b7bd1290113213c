use crate::config::Config;
use crate::object::{Object, Symbol, SymbolGen};
use crate::types::*;

/// A proposition. Negation never introduces a wrapper node: every variant
/// has a negated form expressible in the same grammar.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sentence {
  Logical(LogicOp, Box<Sentence>, Box<Sentence>),
  /// `positive == false` asserts the negation of the base relation.
  Relation(RelOp, bool, Object, Object),
  Quantified(Quant, Symbol, Box<Sentence>),
}

/// The way a goal is split by a [`Decomp`].
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Strategy {
  Separate,
  First,
  Second,
  Direct,
  Contrapositive,
  Bidirectional,
  MutualSubsets,
  Definition,
  General,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subgoal {
  pub given: Option<Sentence>,
  pub goal: Sentence,
}

impl Subgoal {
  fn new(goal: Sentence) -> Self { Self { given: None, goal } }
  fn given(given: Sentence, goal: Sentence) -> Self { Self { given: Some(given), goal } }
}

/// One candidate decomposition of a goal into one or two subgoals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomp {
  pub strategy: Strategy,
  pub primary: Subgoal,
  pub secondary: Option<Subgoal>,
}

impl Decomp {
  fn one(strategy: Strategy, primary: Subgoal) -> Self {
    Self { strategy, primary, secondary: None }
  }
  fn two(strategy: Strategy, primary: Subgoal, secondary: Subgoal) -> Self {
    Self { strategy, primary, secondary: Some(secondary) }
  }
}

/// A fact derivable from a sentence, possibly only once `hypothesis` holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deduct {
  pub hypothesis: Option<Sentence>,
  pub conclusion: Sentence,
}

impl Deduct {
  fn fact(conclusion: Sentence) -> Self { Self { hypothesis: None, conclusion } }
  fn cond(hypothesis: Sentence, conclusion: Sentence) -> Self {
    Self { hypothesis: Some(hypothesis), conclusion }
  }
}

impl Sentence {
  pub fn logical(op: LogicOp, a: Sentence, b: Sentence) -> Sentence {
    Sentence::Logical(op, Box::new(a), Box::new(b))
  }

  pub fn and(a: Sentence, b: Sentence) -> Sentence { Self::logical(LogicOp::And, a, b) }
  pub fn or(a: Sentence, b: Sentence) -> Sentence { Self::logical(LogicOp::Or, a, b) }
  pub fn implies(a: Sentence, b: Sentence) -> Sentence { Self::logical(LogicOp::Implies, a, b) }
  pub fn iff(a: Sentence, b: Sentence) -> Sentence { Self::logical(LogicOp::Iff, a, b) }

  pub fn relation(op: RelOp, a: Object, b: Object) -> Sentence {
    Sentence::Relation(op, true, a, b)
  }

  pub fn quantified(q: Quant, x: Symbol, body: Sentence) -> Sentence {
    Sentence::Quantified(q, x, Box::new(body))
  }

  /// `forall x in S. P` is `forall x. x in S => P`, and
  /// `exists x in S. P` is `exists x. x in S and P`.
  pub fn restricted(q: Quant, x: Symbol, domain: Object, body: Sentence) -> Sentence {
    let member = Sentence::relation(RelOp::In, Object::Sym(x), domain);
    let body = match q {
      Quant::Forall => Sentence::implies(member, body),
      Quant::Exists => Sentence::and(member, body),
    };
    Sentence::quantified(q, x, body)
  }

  fn map_in_place(&mut self, f: impl FnOnce(Sentence) -> Sentence) {
    let dummy = Sentence::Relation(RelOp::Eq, true, Object::Num(0), Object::Num(0));
    let s = std::mem::replace(self, dummy);
    *self = f(s);
  }

  pub fn value(&self) -> Value {
    match *self {
      Sentence::Logical(op, ref a, ref b) => {
        let (a, b) = match (a.value().decided(), b.value().decided()) {
          (Some(a), Some(b)) => (a, b),
          _ => return Value::Unknown,
        };
        Value::from(match op {
          LogicOp::And => a && b,
          LogicOp::Or => a || b,
          LogicOp::Implies => !a || b,
          LogicOp::Iff => a == b,
        })
      }
      Sentence::Relation(op, positive, ref a, ref b) => {
        let v = Value::from(relation_holds(op, a, b));
        if positive { v } else { !v }
      }
      Sentence::Quantified(..) => Value::Unknown,
    }
  }

  /// Replaces the sentence by its negation, pushed inward as far as it goes.
  pub fn negate(&mut self) {
    if let Sentence::Logical(LogicOp::Iff, ..) = self { self.expand_iff() }
    match self {
      Sentence::Logical(op, a, b) => match *op {
        LogicOp::And => { *op = LogicOp::Or; a.negate(); b.negate() }
        LogicOp::Or => { *op = LogicOp::And; a.negate(); b.negate() }
        LogicOp::Implies => { *op = LogicOp::And; b.negate() }
        LogicOp::Iff => unreachable!(),
      },
      Sentence::Relation(_, positive, _, _) => *positive = !*positive,
      Sentence::Quantified(q, _, body) => { *q = q.dual(); body.negate() }
    }
  }

  pub fn negated(mut self) -> Sentence {
    self.negate();
    self
  }

  /// Rewrites `A iff B` into `(A => B) and (B => A)`. Other sentences are
  /// left alone.
  pub fn expand_iff(&mut self) {
    if let Sentence::Logical(LogicOp::Iff, ..) = self {
      self.map_in_place(|s| match s {
        Sentence::Logical(_, a, b) => Sentence::and(
          Sentence::Logical(LogicOp::Implies, a.clone(), b.clone()),
          Sentence::Logical(LogicOp::Implies, b, a)),
        s => s,
      })
    }
  }

  /// `not B => not A` for an implication `A => B`.
  pub fn contrapositive(&self) -> Option<Sentence> {
    match self {
      Sentence::Logical(LogicOp::Implies, a, b) =>
        Some(Sentence::implies((**b).clone().negated(), (**a).clone().negated())),
      _ => None,
    }
  }

  /// `B => A` for an implication `A => B`. Not equivalent to the original.
  pub fn converse(&self) -> Option<Sentence> {
    match self {
      Sentence::Logical(LogicOp::Implies, a, b) => Some(Sentence::implies((**b).clone(), (**a).clone())),
      _ => None,
    }
  }

  /// Unfolds a positive subset relation `A sube B` into
  /// `forall x in A. x in B` with a fresh `x`.
  pub fn expand_subset(&self, gen: &mut SymbolGen, cfg: &Config) -> Option<Sentence> {
    match self {
      Sentence::Relation(RelOp::Subset, true, a, b) => {
        let x = gen.fresh(cfg.subset_var)?;
        Some(Sentence::restricted(Quant::Forall, x, a.clone(),
          Sentence::relation(RelOp::In, Object::Sym(x), b.clone())))
      }
      _ => None,
    }
  }

  /// Unfolds a positive `a div b` into `exists k in ZZ. k * a = b` with a
  /// fresh `k`.
  pub fn expand_divides(&self, gen: &mut SymbolGen, cfg: &Config) -> Option<Sentence> {
    match self {
      Sentence::Relation(RelOp::Divides, true, a, b) => {
        let k = gen.fresh(cfg.divides_var)?;
        let product = Object::num_op(NumOp::Mul, Object::Sym(k), a.clone());
        Some(Sentence::restricted(Quant::Exists, k, Object::Special(SpecialSet::Integers),
          Sentence::relation(RelOp::Eq, product, b.clone())))
      }
      _ => None,
    }
  }

  /// Whether unfolding this goal binds a new variable.
  pub fn needs_fresh_symbol(&self) -> bool {
    matches!(self, Sentence::Relation(RelOp::Subset, true, ..) | Sentence::Relation(RelOp::Divides, true, ..))
  }

  /// The ways this sentence, taken as a goal, can be split into subgoals.
  /// Symbols bound by the new subgoals come from `gen`.
  pub fn decompose(&self, gen: &mut SymbolGen, cfg: &Config) -> Vec<Decomp> {
    use Strategy::*;
    match self {
      Sentence::Logical(op, a, b) => {
        let (a, b) = (&**a, &**b);
        match op {
          LogicOp::And => vec![Decomp::two(Separate, Subgoal::new(a.clone()), Subgoal::new(b.clone()))],
          LogicOp::Or => vec![
            Decomp::one(First, Subgoal::given(b.clone().negated(), a.clone())),
            Decomp::one(Second, Subgoal::given(a.clone().negated(), b.clone())),
          ],
          LogicOp::Implies => vec![
            Decomp::one(Direct, Subgoal::given(a.clone(), b.clone())),
            Decomp::one(Contrapositive, Subgoal::given(b.clone().negated(), a.clone().negated())),
          ],
          LogicOp::Iff => vec![Decomp::two(Bidirectional,
            Subgoal::new(Sentence::implies(a.clone(), b.clone())),
            Subgoal::new(Sentence::implies(b.clone(), a.clone())))],
        }
      }
      Sentence::Relation(RelOp::SetEq, true, a, b) => vec![Decomp::two(MutualSubsets,
        Subgoal::new(Sentence::relation(RelOp::Subset, a.clone(), b.clone())),
        Subgoal::new(Sentence::relation(RelOp::Subset, b.clone(), a.clone())))],
      Sentence::Relation(RelOp::Subset, true, ..) => self.expand_subset(gen, cfg)
        .map(|s| Decomp::one(Definition, Subgoal::new(s))).into_iter().collect(),
      Sentence::Relation(RelOp::Divides, true, ..) => self.expand_divides(gen, cfg)
        .map(|s| Decomp::one(Definition, Subgoal::new(s))).into_iter().collect(),
      Sentence::Quantified(Quant::Forall, _, body) =>
        vec![Decomp::one(General, Subgoal::new((**body).clone()))],
      _ => vec![],
    }
  }

  /// Facts that follow from this sentence, taken as a given.
  pub fn deduce(&self) -> Vec<Deduct> {
    match self {
      Sentence::Logical(op, a, b) => {
        let (a, b) = (&**a, &**b);
        match op {
          LogicOp::And => vec![Deduct::fact(a.clone()), Deduct::fact(b.clone())],
          LogicOp::Or => vec![
            Deduct::cond(b.clone().negated(), a.clone()),
            Deduct::cond(a.clone().negated(), b.clone()),
          ],
          LogicOp::Implies => {
            let mut out = vec![Deduct::cond(a.clone(), b.clone())];
            out.extend(self.contrapositive().map(Deduct::fact));
            out
          }
          LogicOp::Iff => vec![
            Deduct::fact(Sentence::implies(a.clone(), b.clone())),
            Deduct::fact(Sentence::implies(b.clone(), a.clone())),
          ],
        }
      }
      Sentence::Quantified(_, _, body) => vec![Deduct::fact((**body).clone())],
      &Sentence::Relation(op, positive, ref a, ref b) => weakenings(op, positive, a, b)
        .into_iter().map(Deduct::fact).collect(),
    }
  }

  /// Structural equality that ignores symbol identifiers.
  pub fn shape_eq(&self, other: &Sentence) -> bool {
    match (self, other) {
      (Sentence::Logical(o1, a1, b1), Sentence::Logical(o2, a2, b2)) =>
        o1 == o2 && a1.shape_eq(a2) && b1.shape_eq(b2),
      (Sentence::Relation(o1, p1, a1, b1), Sentence::Relation(o2, p2, a2, b2)) =>
        o1 == o2 && p1 == p2 && a1.shape_eq(a2) && b1.shape_eq(b2),
      (Sentence::Quantified(q1, x1, b1), Sentence::Quantified(q2, x2, b2)) =>
        q1 == q2 && x1.name == x2.name && b1.shape_eq(b2),
      _ => false,
    }
  }
}

/// Decides the base (positive) relation when the operands are concrete
/// enough.
fn relation_holds(op: RelOp, a: &Object, b: &Object) -> Option<bool> {
  match op {
    RelOp::Eq | RelOp::SetEq => a.same(b),
    RelOp::Lt => Some(a.eval()? < b.eval()?),
    RelOp::Lte => Some(a.eval()? <= b.eval()?),
    RelOp::In => b.contains(a),
    RelOp::Subset => a.subset_of(b),
    RelOp::ProperSubset => match (a.subset_of(b)?, b.subset_of(a)) {
      (false, _) => Some(false),
      (true, back) => back.map(|back| !back),
    },
    RelOp::Divides => {
      let (a, b) = (a.eval()?, b.eval()?);
      // `checked_rem` only fails for `MIN % -1`, which divides evenly.
      Some(if a == 0 { b == 0 } else { b.checked_rem(a).map_or(true, |r| r == 0) })
    }
  }
}

fn weakenings(op: RelOp, positive: bool, a: &Object, b: &Object) -> Vec<Sentence> {
  let rel = |op, positive, a: &Object, b: &Object| Sentence::Relation(op, positive, a.clone(), b.clone());
  match (op, positive) {
    (RelOp::Eq, true) => vec![rel(RelOp::Lte, true, a, b), rel(RelOp::Lte, true, b, a)],
    (RelOp::Lt, true) => vec![rel(RelOp::Lte, true, a, b), rel(RelOp::Eq, false, a, b)],
    // a >= b
    (RelOp::Lt, false) => vec![rel(RelOp::Lte, true, b, a)],
    // a > b
    (RelOp::Lte, false) => vec![rel(RelOp::Lt, true, b, a), rel(RelOp::Eq, false, a, b)],
    (RelOp::SetEq, true) => vec![rel(RelOp::Subset, true, a, b), rel(RelOp::Subset, true, b, a)],
    (RelOp::ProperSubset, true) => vec![rel(RelOp::Subset, true, a, b), rel(RelOp::SetEq, false, a, b)],
    _ => vec![],
  }
}
