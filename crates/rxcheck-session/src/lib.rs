//! # rxcheck-session
//!
//! The search flow behind every rxcheck front-end.
//!
//! - [`CheckerConfig`]: TOML-driven settings (simulated delay, minimum
//!   query length, suggestion limit, optional replacement table)
//! - [`SearchSession`]: the explicit state container for one user's inputs
//!   and the Idle → Searching → Resolved flow
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let config = CheckerConfig::from_file(Path::new("rxcheck.toml"))?;
//! let mut session = SearchSession::new(&config);
//! session.set_input(Field::First, "warfarin");
//! session.set_input(Field::Second, "aspirin");
//! session.submit(Instant::now());
//! // ...later, on each event-loop tick:
//! if let Some(outcome) = session.poll(Instant::now(), &resolver) { /* render */ }
//! ```

pub mod config;
pub mod session;

pub use config::CheckerConfig;
pub use session::{Field, SearchPhase, SearchSession};
