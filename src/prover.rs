use bitvec::vec::BitVec;
use tracing::debug;

use crate::config::Config;
use crate::error::{ParseResult, ProofError, ProofResult};
use crate::object::SymbolGen;
use crate::parser::parse_str;
use crate::sentence::{Decomp, Deduct, Sentence, Strategy, Subgoal};
use crate::types::*;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Mode {
  NoTheorem,
  Proving,
  Done,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Justification {
  Trivial,
  /// Free-form reasoning, recorded as written and not checked.
  Text(String),
}

/// A goal together with the givens introduced at this point of the proof.
/// The goal is proven once every child goal is proven, or directly by a
/// justification if the node is a leaf.
#[derive(Debug)]
pub struct Node {
  pub goal: Sentence,
  pub givens: Vec<Sentence>,
  pub parent: Option<NodeId>,
  pub primary: Option<NodeId>,
  pub secondary: Option<NodeId>,
  pub justification: Option<Justification>,
}

impl Node {
  fn new(parent: Option<NodeId>, Subgoal { given, goal }: Subgoal) -> Self {
    Self {
      goal,
      givens: given.into_iter().collect(),
      parent,
      primary: None,
      secondary: None,
      justification: None,
    }
  }

  pub fn is_leaf(&self) -> bool { self.primary.is_none() && self.secondary.is_none() }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status {
  pub nodes: usize,
  pub open: usize,
  pub discharged: usize,
}

/// Proves one theorem by decomposing it into a binary tree of goals.
///
/// `frontier` holds the open leaves in depth-first order with the current
/// goal on top, and `lineage` is the path from the root to the current goal;
/// the givens of every node on that path are in scope.
#[derive(Debug)]
pub struct TheoremProver {
  config: Config,
  gen: SymbolGen,
  nodes: Store<NodeId, Node>,
  discharged: BitVec,
  root: Option<NodeId>,
  frontier: Vec<NodeId>,
  lineage: Vec<NodeId>,
}

impl Default for TheoremProver {
  fn default() -> Self { Self::with_config(Config::default()) }
}

impl TheoremProver {
  pub fn new() -> Self { Self::default() }

  pub fn with_config(config: Config) -> Self {
    Self {
      gen: SymbolGen::new(config.first_symbol),
      config,
      nodes: Store::default(),
      discharged: BitVec::new(),
      root: None,
      frontier: vec![],
      lineage: vec![],
    }
  }

  pub fn config(&self) -> &Config { &self.config }

  /// Parses a sentence using this prover's symbol generator. The proof
  /// state is not touched.
  pub fn parse(&mut self, text: &str) -> ParseResult<Sentence> { parse_str(text, &mut self.gen) }

  /// Parses `text` and makes it the theorem. On a parse error the current
  /// proof is kept.
  pub fn load(&mut self, text: &str) -> ParseResult<()> {
    let s = self.parse(text)?;
    self.set_theorem(Some(s));
    Ok(())
  }

  /// Discards the current proof and starts proving `s`, if any.
  pub fn set_theorem(&mut self, s: Option<Sentence>) {
    self.nodes.clear();
    self.discharged.clear();
    self.frontier.clear();
    self.lineage.clear();
    self.root = s.map(|goal| {
      debug!(theorem = %goal, "theorem loaded");
      let root = self.add_node(None, Subgoal { given: None, goal });
      self.frontier.push(root);
      self.lineage.push(root);
      root
    });
  }

  fn add_node(&mut self, parent: Option<NodeId>, sub: Subgoal) -> NodeId {
    self.discharged.push(false);
    self.nodes.push(Node::new(parent, sub))
  }

  pub fn mode(&self) -> Mode {
    match self.root {
      None => Mode::NoTheorem,
      Some(_) if self.frontier.is_empty() => Mode::Done,
      Some(_) => Mode::Proving,
    }
  }

  fn check_proving(&self) -> ProofResult<NodeId> {
    match (self.mode(), self.frontier.last()) {
      (Mode::Proving, Some(&n)) => Ok(n),
      (mode, _) => Err(ProofError::WrongMode(mode)),
    }
  }

  pub fn root(&self) -> Option<NodeId> { self.root }
  pub fn node(&self, n: NodeId) -> &Node { &self.nodes[n] }
  pub fn theorem(&self) -> Option<&Sentence> { self.root.map(|n| &self.nodes[n].goal) }
  pub fn current(&self) -> Option<NodeId> { self.frontier.last().copied() }
  pub fn current_goal(&self) -> Option<&Sentence> { self.current().map(|n| &self.nodes[n].goal) }
  pub fn frontier(&self) -> &[NodeId] { &self.frontier }
  pub fn lineage(&self) -> &[NodeId] { &self.lineage }

  /// Every given usable at the current goal, in lineage order, tagged with
  /// the node that introduced it.
  pub fn givens_in_scope(&self) -> Vec<(NodeId, &Sentence)> {
    self.lineage.iter()
      .flat_map(|&n| self.nodes[n].givens.iter().map(move |g| (n, g)))
      .collect()
  }

  /// A node is proven if it was discharged directly or all its children are
  /// proven.
  pub fn is_proven(&self, n: NodeId) -> bool {
    let node = &self.nodes[n];
    if node.is_leaf() { return self.discharged[n.into_usize()] }
    node.primary.iter().chain(&node.secondary).all(|&c| self.is_proven(c))
  }

  pub fn status(&self) -> Status {
    Status {
      nodes: self.nodes.len(),
      open: self.frontier.len(),
      discharged: self.discharged.count_ones(),
    }
  }

  fn options(&self, cur: NodeId, gen: &mut SymbolGen) -> ProofResult<Vec<Decomp>> {
    let node = &self.nodes[cur];
    if !node.is_leaf() { return Err(ProofError::AlreadyDecomposed) }
    if gen.is_exhausted() && node.goal.needs_fresh_symbol() { return Err(ProofError::SymbolsExhausted) }
    Ok(node.goal.decompose(gen, &self.config))
  }

  /// The ways the current goal can be decomposed. Listing them binds no
  /// symbols, so applying an option yields exactly the goals listed.
  pub fn decompositions(&self) -> ProofResult<Vec<Decomp>> {
    let cur = self.check_proving()?;
    self.options(cur, &mut self.gen.clone())
  }

  /// Applies decomposition option `choice` to the current goal. The primary
  /// subgoal becomes the new current goal.
  pub fn decompose(&mut self, choice: usize) -> ProofResult<Strategy> {
    let cur = self.check_proving()?;
    let mut gen = self.gen.clone();
    let mut options = self.options(cur, &mut gen)?;
    if options.is_empty() { return Err(ProofError::NoOptionsAvailable) }
    if choice >= options.len() {
      return Err(ProofError::ChoiceOutOfRange { choice, count: options.len() })
    }
    let Decomp { strategy, primary, secondary } = options.swap_remove(choice);
    self.gen = gen;
    self.frontier.pop();
    let primary = self.add_node(Some(cur), primary);
    let secondary = secondary.map(|sub| self.add_node(Some(cur), sub));
    let node = &mut self.nodes[cur];
    node.primary = Some(primary);
    node.secondary = secondary;
    self.frontier.extend(secondary);
    self.frontier.push(primary);
    self.lineage.push(primary);
    debug!(node = %cur, %strategy, %primary, ?secondary, "decomposed goal");
    Ok(strategy)
  }

  /// Facts derivable from the givens in scope, in lineage order.
  pub fn deductions(&self) -> ProofResult<Vec<Deduct>> {
    self.check_proving()?;
    Ok(self.givens_in_scope().into_iter().flat_map(|(_, g)| g.deduce()).collect())
  }

  /// Adds deduction `choice` to the givens of the current goal. A
  /// conditional deduction whose hypothesis is not already in scope is
  /// recorded as an implication.
  pub fn deduce(&mut self, choice: usize) -> ProofResult<&Sentence> {
    let cur = self.check_proving()?;
    let mut options = self.deductions()?;
    if options.is_empty() { return Err(ProofError::NoOptionsAvailable) }
    if choice >= options.len() {
      return Err(ProofError::ChoiceOutOfRange { choice, count: options.len() })
    }
    let Deduct { hypothesis, conclusion } = options.swap_remove(choice);
    let fact = match hypothesis {
      Some(h) if !self.givens_in_scope().iter().any(|&(_, g)| *g == h) => Sentence::implies(h, conclusion),
      _ => conclusion,
    };
    debug!(node = %cur, %fact, "deduced given");
    let givens = &mut self.nodes[cur].givens;
    givens.push(fact);
    Ok(&givens[givens.len() - 1])
  }

  /// Discharges the current goal as immediate.
  pub fn trivial(&mut self) -> ProofResult<()> { self.discharge(Justification::Trivial) }

  /// Discharges the current goal with free-form reasoning, which is stored
  /// but not interpreted.
  pub fn justify(&mut self, text: impl Into<String>) -> ProofResult<()> {
    self.discharge(Justification::Text(text.into()))
  }

  fn discharge(&mut self, j: Justification) -> ProofResult<()> {
    let cur = self.check_proving()?;
    self.frontier.pop();
    self.discharged.set(cur.into_usize(), true);
    self.nodes[cur].justification = Some(j);
    match self.frontier.last() {
      None => debug!(node = %cur, "proof complete"),
      Some(&next) => {
        let parent = self.nodes[next].parent;
        while let Some(&top) = self.lineage.last() {
          if Some(top) == parent { break }
          self.lineage.pop();
        }
        self.lineage.push(next);
        debug!(node = %cur, next = %next, "goal discharged");
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ParseError;

  fn prover(text: &str) -> TheoremProver {
    let mut tp = TheoremProver::new();
    tp.load(text).unwrap();
    tp
  }

  #[test]
  fn modes() {
    let mut tp = TheoremProver::new();
    assert_eq!(tp.mode(), Mode::NoTheorem);
    assert_eq!(tp.trivial(), Err(ProofError::WrongMode(Mode::NoTheorem)));
    tp.load("(= 1 1)").unwrap();
    assert_eq!(tp.mode(), Mode::Proving);
    tp.trivial().unwrap();
    assert_eq!(tp.mode(), Mode::Done);
    assert_eq!(tp.decompose(0), Err(ProofError::WrongMode(Mode::Done)));
    tp.set_theorem(None);
    assert_eq!(tp.mode(), Mode::NoTheorem);
    assert!(tp.theorem().is_none());
  }

  #[test]
  fn separate_then_discharge_both() {
    let mut tp = prover("(and (= 1 1) (= 2 2))");
    assert_eq!(tp.decompose(0), Ok(Strategy::Separate));
    assert_eq!(tp.current_goal().unwrap().to_string(), "(= 1 1)");
    assert_eq!(tp.frontier().len(), 2);
    tp.trivial().unwrap();
    assert_eq!(tp.current_goal().unwrap().to_string(), "(= 2 2)");
    assert_eq!(tp.lineage(), &[NodeId(0), NodeId(2)]);
    tp.trivial().unwrap();
    assert_eq!(tp.mode(), Mode::Done);
    assert!(tp.frontier().is_empty());
    assert!(tp.is_proven(NodeId(0)));
    assert_eq!(tp.status(), Status { nodes: 3, open: 0, discharged: 2 });
  }

  #[test]
  fn givens_follow_the_lineage() {
    let mut tp = prover("(=> (= a 1) (and (< a 2) (<= a 1)))");
    tp.decompose(0).unwrap();
    tp.decompose(0).unwrap();
    let givens: Vec<String> = tp.givens_in_scope().iter().map(|(_, g)| g.to_string()).collect();
    assert_eq!(givens, vec!["(= a 1)"]);
    assert_eq!(tp.current_goal().unwrap().to_string(), "(< a 2)");
    tp.trivial().unwrap();
    // the sibling still sees the given introduced above it
    assert_eq!(tp.current_goal().unwrap().to_string(), "(<= a 1)");
    assert_eq!(tp.givens_in_scope().len(), 1);
    assert_eq!(tp.lineage(), &[NodeId(0), NodeId(1), NodeId(3)]);
  }

  #[test]
  fn failed_commands_keep_state() {
    let mut tp = prover("(= x 1)");
    assert_eq!(tp.decompose(0), Err(ProofError::NoOptionsAvailable));
    assert_eq!(tp.deduce(0), Err(ProofError::NoOptionsAvailable));
    assert!(tp.load("(and (= 1 1)").is_err());
    assert_eq!(tp.theorem().unwrap().to_string(), "(= x 1)");
    assert_eq!(tp.mode(), Mode::Proving);

    let mut tp = prover("(or (= 1 1) (= 2 2))");
    assert_eq!(tp.decompose(2), Err(ProofError::ChoiceOutOfRange { choice: 2, count: 2 }));
    assert_eq!(tp.status().nodes, 1);
  }

  #[test]
  fn deduce_from_givens() {
    let mut tp = prover("(=> (and (< 1 2) (= y 3)) (= y 3))");
    tp.decompose(0).unwrap();
    let options: Vec<String> = tp.deductions().unwrap().iter().map(|d| d.to_string()).collect();
    assert_eq!(options, vec!["(< 1 2)", "(= y 3)"]);
    assert_eq!(tp.deduce(1).unwrap().to_string(), "(= y 3)");
    assert_eq!(tp.givens_in_scope().len(), 2);
    assert_eq!(tp.frontier().len(), 1);
  }

  #[test]
  fn conditional_deduction() {
    let mut tp = prover("(=> (or (= z 1) (= z 2)) (< z 3))");
    tp.decompose(0).unwrap();
    // (!= z 2) is not in scope, so the implication is recorded
    assert_eq!(tp.deduce(0).unwrap().to_string(), "(=> (!= z 2) (= z 1))");

    let mut tp = prover("(=> (and (!= z 2) (or (= z 1) (= z 2))) (< z 3))");
    tp.decompose(0).unwrap();
    tp.deduce(0).unwrap();
    tp.deduce(1).unwrap();
    // options: (!= z 2) and (or ..) from the conjunction, then the two
    // conditionals of the disjunction
    assert_eq!(tp.deductions().unwrap().len(), 4);
    assert_eq!(tp.deduce(2).unwrap().to_string(), "(= z 1)");
  }

  #[test]
  fn justification_is_recorded() {
    let mut tp = prover("(forall n in NN (>= n 0))");
    assert_eq!(tp.decompose(0), Ok(Strategy::General));
    tp.justify("naturals are non-negative").unwrap();
    assert_eq!(tp.mode(), Mode::Done);
    assert_eq!(tp.node(NodeId(1)).justification,
      Some(Justification::Text("naturals are non-negative".into())));
  }

  #[test]
  fn seeded_symbols() {
    let mut tp = TheoremProver::with_config(Config { first_symbol: 100, ..Config::default() });
    tp.load("(sube A B)").unwrap();
    tp.decompose(0).unwrap();
    match tp.current_goal().unwrap() {
      Sentence::Quantified(_, x, _) => assert_eq!(x.id, SymbolId(102)),
      g => panic!("{:?}", g),
    }
  }

  #[test]
  fn listing_options_binds_nothing() {
    let mut tp = prover("(sube A B)");
    let listed = tp.decompositions().unwrap();
    assert_eq!(tp.decompositions().unwrap(), listed);
    tp.decompose(0).unwrap();
    assert_eq!(tp.current_goal(), Some(&listed[0].primary.goal));
  }

  #[test]
  fn identifiers_run_out_without_panicking() {
    let mut tp = TheoremProver::with_config(Config { first_symbol: u32::MAX, ..Config::default() });
    assert_eq!(tp.load("(= x y)"), Err(ParseError::SymbolsExhausted));
    assert_eq!(tp.mode(), Mode::NoTheorem);
    // a failed parse still used up the last identifier
    assert_eq!(tp.load("(= 1 z)"), Err(ParseError::SymbolsExhausted));

    let mut tp = TheoremProver::with_config(Config { first_symbol: u32::MAX, ..Config::default() });
    tp.load("(sube A A)").unwrap();
    assert_eq!(tp.decompositions(), Err(ProofError::SymbolsExhausted));
    assert_eq!(tp.decompose(0), Err(ProofError::SymbolsExhausted));
    assert_eq!(tp.status().nodes, 1);

    let mut tp = TheoremProver::with_config(Config { first_symbol: u32::MAX - 1, ..Config::default() });
    tp.load("(sube A A)").unwrap();
    assert_eq!(tp.decompose(0), Ok(Strategy::Definition));
    assert_eq!(tp.decompose(0), Ok(Strategy::General));
  }
}
