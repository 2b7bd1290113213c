use std::ops::{Index, IndexMut, Not};

pub trait Idx: Copy {
  fn from(_: u32) -> Self;
  fn into_u32(self) -> u32;
  fn into_usize(self) -> usize { self.into_u32() as usize }
}

macro_rules! idx {($($ty:ident),*) => {
  $(
    #[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
    pub struct $ty(pub u32);
    impl Idx for $ty {
      fn from(n: u32) -> Self { Self(n) }
      fn into_u32(self) -> u32 { self.0 }
    }
  )*
}}

idx! { SymbolId, NodeId }

/// A growable vector addressed by one of the typed indices above.
#[derive(Debug, Clone)]
pub struct Store<I, T> {
  items: Vec<T>,
  _idx: std::marker::PhantomData<I>,
}

impl<I, T> Default for Store<I, T> {
  fn default() -> Self { Self { items: vec![], _idx: std::marker::PhantomData } }
}

impl<I: Idx, T> Store<I, T> {
  pub fn push(&mut self, t: T) -> I {
    let n = self.items.len() as u32;
    self.items.push(t);
    I::from(n)
  }

  pub fn len(&self) -> usize { self.items.len() }
  pub fn is_empty(&self) -> bool { self.items.is_empty() }
  pub fn clear(&mut self) { self.items.clear() }

  pub fn iter(&self) -> impl Iterator<Item=(I, &T)> {
    self.items.iter().enumerate().map(|(i, t)| (I::from(i as u32), t))
  }
}

impl<I: Idx, T> Index<I> for Store<I, T> {
  type Output = T;
  fn index(&self, i: I) -> &T { &self.items[i.into_usize()] }
}
impl<I: Idx, T> IndexMut<I> for Store<I, T> {
  fn index_mut(&mut self, i: I) -> &mut T { &mut self.items[i.into_usize()] }
}

/// Three-valued truth. `Unknown` means the model cannot decide the sentence.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Value {
  False,
  True,
  Unknown,
}

impl From<bool> for Value {
  fn from(b: bool) -> Self { if b { Value::True } else { Value::False } }
}

impl From<Option<bool>> for Value {
  fn from(b: Option<bool>) -> Self { b.map_or(Value::Unknown, Value::from) }
}

impl Value {
  pub fn decided(self) -> Option<bool> {
    match self {
      Value::False => Some(false),
      Value::True => Some(true),
      Value::Unknown => None,
    }
  }
}

impl Not for Value {
  type Output = Value;
  fn not(self) -> Value {
    match self {
      Value::False => Value::True,
      Value::True => Value::False,
      Value::Unknown => Value::Unknown,
    }
  }
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum NumOp {
  Add,
  Sub,
  Mul,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum SetOp {
  Union,
  Intersect,
  Diff,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum SpecialSet {
  Empty,
  Integers,
  Naturals,
  Sets,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum LogicOp {
  And,
  Or,
  Implies,
  Iff,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum RelOp {
  Eq,
  Lt,
  Lte,
  SetEq,
  Subset,
  ProperSubset,
  In,
  Divides,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Quant {
  Forall,
  Exists,
}

impl Quant {
  pub fn dual(self) -> Self {
    match self {
      Quant::Forall => Quant::Exists,
      Quant::Exists => Quant::Forall,
    }
  }
}
