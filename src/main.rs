use std::io::{self, BufRead, Write};

use spa::config::Config;
use spa::driver::{Reply, Session};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> io::Result<()> {
  // RUST_LOG=spa=debug shows each proof step.
  tracing_subscriber::registry()
    .with(fmt::layer().with_ansi(false).without_time().with_writer(io::stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .init();

  let mut session = Session::new(Config::default());
  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = stdout.lock();
  write!(out, "> ")?;
  out.flush()?;
  for line in stdin.lock().lines() {
    match session.dispatch(&line?) {
      Ok(Reply::Quit) => break,
      Ok(Reply::Text(s)) => if !s.is_empty() { writeln!(out, "{}", s)? },
      Err(e) => eprintln!("error: {}", e),
    }
    write!(out, "> ")?;
    out.flush()?;
  }
  info!("session ended");
  Ok(())
}
