use spa::config::Config;
use spa::driver::{DriverError, Reply, Session};
use spa::error::ParseError;
use spa::object::{Object, SymbolGen};
use spa::parser::parse_str;
use spa::prover::{Mode, TheoremProver};
use spa::sentence::Sentence;
use spa::types::{NodeId, Quant, RelOp, Value};

fn run(s: &mut Session, line: &str) -> String {
  match s.dispatch(line) {
    Ok(Reply::Text(t)) => t,
    r => panic!("{}: unexpected reply {:?}", line, r),
  }
}

#[test]
fn prove_a_conjunction() {
  let mut s = Session::new(Config::default());
  run(&mut s, "prove (and (= 1 1) (= 2 2))");
  run(&mut s, "dec 1");
  run(&mut s, "triv");
  assert_eq!(run(&mut s, "triv"), "proof complete");
  assert_eq!(s.prover.mode(), Mode::Done);
  assert!(s.prover.is_proven(NodeId(0)));
  assert_eq!(run(&mut s, "stat"), "proof complete: 3 nodes, 0 open, 2 discharged");
}

#[test]
fn set_equality_by_mutual_subsets() {
  let mut s = Session::new(Config::default());
  run(&mut s, "prove (s= A B)");
  assert_eq!(run(&mut s, "dec"), "1. mutual subsets: prove (sube A B); prove (sube B A)");
  assert_eq!(run(&mut s, "dec 1"), "[B] (sube A B)");
  assert_eq!(run(&mut s, "dec 1"), "[D] (forall x (=> (in x A) (in x B)))");
  assert_eq!(run(&mut s, "dec 1"), "[E] (=> (in x A) (in x B))");
  assert_eq!(run(&mut s, "dec 1"), "[F] (in x B)");
  assert_eq!(run(&mut s, "given"), "[F] (in x A)");
  run(&mut s, "just x is in both by assumption");
  assert_eq!(run(&mut s, "goal"), "[C] (sube B A)");
  assert_eq!(run(&mut s, "given"), "(no givens)");
}

#[test]
fn failed_parse_keeps_the_theorem() {
  let mut s = Session::new(Config::default());
  run(&mut s, "prove (or (= 1 2) (< 1 2))");
  assert_eq!(s.dispatch("prove (and (= 1 1)"), Err(DriverError::Parse(ParseError::UnexpectedEnd)));
  assert_eq!(run(&mut s, "thm"), "(or (= 1 2) (< 1 2))");
  assert_eq!(run(&mut s, "dec 2"), "[B] (< 1 2)");
  assert_eq!(run(&mut s, "given"), "[B] (!= 1 2)");
}

#[test]
fn quantifier_binding_lasts_for_the_rest_of_the_line() {
  let mut gen = SymbolGen::default();
  let s = parse_str("(and (exists y in NN (< y 3)) (= y 4))", &mut gen).unwrap();
  let (inner, outer) = match &s {
    Sentence::Logical(_, a, b) => match (&**a, &**b) {
      (Sentence::Quantified(Quant::Exists, y, _), Sentence::Relation(RelOp::Eq, true, Object::Sym(z), _)) => (*y, *z),
      _ => panic!("{}", s),
    },
    _ => panic!("{}", s),
  };
  assert_eq!(inner, outer);
  let again = parse_str("(= y 4)", &mut gen).unwrap();
  match again {
    Sentence::Relation(_, _, Object::Sym(y), _) => assert_ne!(y, inner),
    s => panic!("{}", s),
  }
}

#[test]
fn ground_sentences_are_decided() {
  let mut gen = SymbolGen::default();
  let mut value = |t: &str| parse_str(t, &mut gen).unwrap().value();
  assert_eq!(value("(div 3 (* 4 6))"), Value::True);
  assert_eq!(value("(sub {1} {1, 2})"), Value::True);
  assert_eq!(value("(s= null {})"), Value::True);
  assert_eq!(value("(s!= {} null)"), Value::False);
  assert_eq!(value("(in 3 (diff {1, 2, 3} {3}))"), Value::False);
  assert_eq!(value("(=> (= 1 2) (= x 5))"), Value::Unknown);
  assert_eq!(value("(iff (< 1 2) (notin 5 null))"), Value::True);
}

#[test]
fn prover_api_matches_the_driver() {
  let mut tp = TheoremProver::new();
  tp.load("(iff (= a 1) (= 1 a))").unwrap();
  tp.decompose(0).unwrap();
  assert_eq!(tp.current_goal().unwrap().to_string(), "(=> (= a 1) (= 1 a))");
  assert_eq!(tp.frontier().len(), 2);
}
