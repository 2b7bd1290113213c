use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use num::{CheckedAdd, CheckedMul, CheckedSub};

use crate::types::*;

/// A variable. Two symbols are the same variable iff their identifiers
/// match; the character is only used for printing.
#[derive(Copy, Clone, Debug)]
pub struct Symbol {
  pub name: char,
  pub id: SymbolId,
}

impl PartialEq for Symbol {
  fn eq(&self, other: &Self) -> bool { self.id == other.id }
}
impl Eq for Symbol {}
impl Hash for Symbol {
  fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state) }
}

/// Hands out symbol identifiers. One generator is owned by each prover and
/// threaded through every parse and every rewrite that binds a new variable.
#[derive(Clone, Debug)]
pub struct SymbolGen {
  next: Option<u32>,
}

impl Default for SymbolGen {
  fn default() -> Self { Self::new(0) }
}

impl SymbolGen {
  pub fn new(first: u32) -> Self { Self { next: Some(first) } }

  /// A symbol with an identifier never handed out before, or `None` once
  /// the identifiers are used up.
  pub fn fresh(&mut self, name: char) -> Option<Symbol> {
    let n = self.next?;
    self.next = n.checked_add(1);
    Some(Symbol { name, id: SymbolId(n) })
  }

  pub fn is_exhausted(&self) -> bool { self.next.is_none() }
}

/// Maps symbol characters to the identifier currently bound to them.
pub type SymMap = HashMap<char, SymbolId>;

impl Symbol {
  /// Resolves `name` in `scope`. Fresh symbols always get a new identifier
  /// and shadow any earlier binding; other symbols reuse the binding if
  /// there is one. Any newly generated identifier is bound in `scope`.
  pub fn resolve(name: char, scope: &mut SymMap, gen: &mut SymbolGen, fresh: bool) -> Option<Symbol> {
    if !fresh {
      if let Some(&id) = scope.get(&name) { return Some(Symbol { name, id }) }
    }
    let sym = gen.fresh(name)?;
    scope.insert(name, sym.id);
    Some(sym)
  }
}

/// What an object may stand for. Symbols are both numbers and sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sort {
  Number,
  Set,
  Either,
}

impl Sort {
  pub fn is_number(self) -> bool { self != Sort::Set }
  pub fn is_set(self) -> bool { self != Sort::Number }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Object {
  Num(i64),
  NumOp(NumOp, Box<Object>, Box<Object>),
  /// A finite set, in insertion order.
  Set(Vec<Object>),
  Special(SpecialSet),
  SetOp(SetOp, Box<Object>, Box<Object>),
  Sym(Symbol),
}

fn any3(it: impl IntoIterator<Item=Option<bool>>) -> Option<bool> {
  let mut unknown = false;
  for b in it {
    match b {
      Some(true) => return Some(true),
      Some(false) => {}
      None => unknown = true,
    }
  }
  if unknown { None } else { Some(false) }
}

fn all3(it: impl IntoIterator<Item=Option<bool>>) -> Option<bool> {
  any3(it.into_iter().map(|b| b.map(|b| !b))).map(|b| !b)
}

impl Object {
  pub fn num_op(op: NumOp, a: Object, b: Object) -> Object {
    Object::NumOp(op, Box::new(a), Box::new(b))
  }

  pub fn set_op(op: SetOp, a: Object, b: Object) -> Object {
    Object::SetOp(op, Box::new(a), Box::new(b))
  }

  pub fn sort(&self) -> Sort {
    match self {
      Object::Num(_) | Object::NumOp(..) => Sort::Number,
      Object::Set(_) | Object::Special(_) | Object::SetOp(..) => Sort::Set,
      Object::Sym(_) => Sort::Either,
    }
  }

  /// The integer value of a number built only from literals, or `None` if
  /// it mentions a symbol, is not a number, or overflows.
  pub fn eval(&self) -> Option<i64> {
    match *self {
      Object::Num(n) => Some(n),
      Object::NumOp(op, ref a, ref b) => {
        let (a, b) = (a.eval()?, b.eval()?);
        match op {
          NumOp::Add => CheckedAdd::checked_add(&a, &b),
          NumOp::Sub => CheckedSub::checked_sub(&a, &b),
          NumOp::Mul => CheckedMul::checked_mul(&a, &b),
        }
      }
      _ => None,
    }
  }

  /// Decides whether `self` and `other` denote the same object, when the
  /// model can tell.
  pub fn same(&self, other: &Object) -> Option<bool> {
    if self == other { return Some(true) }
    if let (Some(x), Some(y)) = (self.eval(), other.eval()) { return Some(x == y) }
    match (self, other) {
      (Object::Set(_), o) | (o, Object::Set(_)) if o.eval().is_some() => Some(false),
      _ if self.is_finite() || other.is_finite() =>
        all3(vec![self.subset_of(other), other.subset_of(self)]),
      _ => None,
    }
  }

  fn is_finite(&self) -> bool {
    matches!(self, Object::Set(_) | Object::Special(SpecialSet::Empty))
  }

  /// Set membership. Finite sets compare their elements, compound sets
  /// combine the answers of their operands, and special sets other than
  /// the empty set never decide.
  pub fn contains(&self, obj: &Object) -> Option<bool> {
    match *self {
      Object::Set(ref items) => any3(items.iter().map(|x| x.same(obj))),
      Object::Special(SpecialSet::Empty) => Some(false),
      Object::Special(_) | Object::Sym(_) => None,
      Object::SetOp(op, ref a, ref b) => {
        let (a, b) = (a.contains(obj), b.contains(obj));
        match op {
          SetOp::Union => any3(vec![a, b]),
          SetOp::Intersect => all3(vec![a, b]),
          SetOp::Diff => all3(vec![a, b.map(|b| !b)]),
        }
      }
      Object::Num(_) | Object::NumOp(..) => None,
    }
  }

  /// Decides `self ⊆ other` when `self` is finite.
  pub fn subset_of(&self, other: &Object) -> Option<bool> {
    match self {
      Object::Set(items) => all3(items.iter().map(|x| other.contains(x))),
      Object::Special(SpecialSet::Empty) => Some(true),
      _ => if self == other { Some(true) } else { None },
    }
  }

  /// Structural equality that ignores symbol identifiers and compares only
  /// their characters.
  pub fn shape_eq(&self, other: &Object) -> bool {
    match (self, other) {
      (Object::Num(a), Object::Num(b)) => a == b,
      (Object::NumOp(o1, a1, b1), Object::NumOp(o2, a2, b2)) =>
        o1 == o2 && a1.shape_eq(a2) && b1.shape_eq(b2),
      (Object::Set(xs), Object::Set(ys)) =>
        xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x.shape_eq(y)),
      (Object::Special(a), Object::Special(b)) => a == b,
      (Object::SetOp(o1, a1, b1), Object::SetOp(o2, a2, b2)) =>
        o1 == o2 && a1.shape_eq(a2) && b1.shape_eq(b2),
      (Object::Sym(a), Object::Sym(b)) => a.name == b.name,
      _ => false,
    }
  }
}
