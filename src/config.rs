/// Knobs for a prover session.
#[derive(Clone, Debug)]
pub struct Config {
  /// Display character of the element variable introduced when a subset
  /// goal is unfolded to its definition.
  pub subset_var: char,
  /// Display character of the witness introduced when a divisibility goal
  /// is unfolded to its definition.
  pub divides_var: char,
  /// First identifier handed out by the session's symbol generator.
  pub first_symbol: u32,
}

impl Default for Config {
  fn default() -> Self { Self { subset_var: 'x', divides_var: 'k', first_symbol: 0 } }
}
