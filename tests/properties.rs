//! Property-based tests for printing, parsing and negation.

use proptest::prelude::*;
use spa::object::{Object, Symbol, SymbolGen};
use spa::parser::parse_str;
use spa::sentence::Sentence;
use spa::types::*;

fn arb_symbol() -> impl Strategy<Value = Symbol> {
  (prop::sample::select(vec!['a', 'b', 'x']), 0..4u32).prop_map(|(name, id)| Symbol { name, id: SymbolId(id) })
}

fn arb_number(depth: u32) -> BoxedStrategy<Object> {
  let leaf = prop_oneof![
    3 => (-20..20i64).prop_map(Object::Num),
    1 => arb_symbol().prop_map(Object::Sym),
  ];
  if depth == 0 { return leaf.boxed() }
  prop_oneof![
    3 => leaf,
    1 => (prop::sample::select(NumOp::ALL.to_vec()), arb_number(depth - 1), arb_number(depth - 1))
      .prop_map(|(op, a, b)| Object::num_op(op, a, b)),
  ].boxed()
}

fn arb_set(depth: u32) -> BoxedStrategy<Object> {
  let leaf = prop_oneof![
    2 => prop::collection::vec(arb_number(0), 0..4).prop_map(Object::Set),
    1 => prop::sample::select(SpecialSet::ALL.to_vec()).prop_map(Object::Special),
    1 => arb_symbol().prop_map(Object::Sym),
  ];
  if depth == 0 { return leaf.boxed() }
  prop_oneof![
    3 => leaf,
    1 => (prop::sample::select(SetOp::ALL.to_vec()), arb_set(depth - 1), arb_set(depth - 1))
      .prop_map(|(op, a, b)| Object::set_op(op, a, b)),
  ].boxed()
}

fn arb_relation() -> BoxedStrategy<Sentence> {
  (prop::sample::select(RelOp::ALL.to_vec()), any::<bool>()).prop_flat_map(|(op, positive)| {
    let args = match op {
      RelOp::Eq | RelOp::Lt | RelOp::Lte | RelOp::Divides => (arb_number(2), arb_number(2)).boxed(),
      RelOp::SetEq | RelOp::Subset | RelOp::ProperSubset => (arb_set(2), arb_set(2)).boxed(),
      RelOp::In => (arb_number(1), arb_set(2)).boxed(),
    };
    args.prop_map(move |(a, b)| Sentence::Relation(op, positive, a, b))
  }).boxed()
}

fn arb_sentence(depth: u32, ops: Vec<LogicOp>) -> BoxedStrategy<Sentence> {
  if depth == 0 { return arb_relation() }
  prop_oneof![
    2 => arb_relation(),
    2 => (prop::sample::select(ops.clone()), arb_sentence(depth - 1, ops.clone()), arb_sentence(depth - 1, ops.clone()))
      .prop_map(|(op, a, b)| Sentence::logical(op, a, b)),
    1 => (prop::sample::select(Quant::ALL.to_vec()), arb_symbol(), arb_sentence(depth - 1, ops))
      .prop_map(|(q, x, body)| Sentence::quantified(q, x, body)),
  ].boxed()
}

fn any_sentence() -> BoxedStrategy<Sentence> { arb_sentence(3, LogicOp::ALL.to_vec()) }

proptest! {
  #[test]
  fn printed_sentences_parse_back(s in any_sentence()) {
    let text = s.to_string();
    let parsed = parse_str(&text, &mut SymbolGen::default());
    prop_assert!(parsed.is_ok(), "{} failed: {:?}", text, parsed);
    let parsed = parsed.unwrap();
    prop_assert!(parsed.shape_eq(&s), "{} reparsed as {}", text, parsed);
  }

  #[test]
  fn negation_flips_the_value(s in any_sentence()) {
    prop_assert_eq!(s.clone().negated().value(), !s.value());
    prop_assert_eq!(s.clone().negated().negated().value(), s.value());
  }

  #[test]
  fn negation_is_an_involution_without_implications(
    s in arb_sentence(3, vec![LogicOp::And, LogicOp::Or])
  ) {
    prop_assert_eq!(s.clone().negated().negated(), s);
  }

  #[test]
  fn contrapositive_preserves_the_value(
    a in arb_sentence(1, LogicOp::ALL.to_vec()),
    b in arb_sentence(1, LogicOp::ALL.to_vec()),
  ) {
    let s = Sentence::implies(a, b);
    let c = s.contrapositive();
    prop_assert!(c.is_some());
    prop_assert_eq!(c.unwrap().value(), s.value());
  }
}
