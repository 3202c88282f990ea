//! Data-driven scoring rules.
//!
//! The corrosion point system, level bands, mechanical base values and
//! coefficients, application tables, advice texts and cost weights all live
//! in a TOML rule table rather than in code, so each rule can be inspected
//! and tested on its own.
//!
//! # Architecture
//!
//! - **Rules**: Loaded from TOML at startup (or embedded defaults)
//! - **Conditions**: Tagged tests on element content, category, corrosion
//!   score or a mechanical property
//! - **Groups**: Rules sharing a group form a band ladder; the first match wins
//!
//! # Example
//!
//! ```ignore
//! use steelmate::rules::{default_rules, fire, total_points, RuleContext};
//!
//! let rules = default_rules();
//! let ctx = RuleContext::new(&composition, record.category());
//! let fired = fire(&rules.corrosion.rules, &ctx);
//! let score = total_points(&fired).clamp(0.0, 100.0);
//! ```

mod eval;
mod loader;
mod types;

pub use eval::{explanations, fire, total_points, triggered, RuleContext};
pub use loader::{default_rules, load_rules, parse_rules};
pub use types::*;
