//! Pattern definitions and playback
//!
//! Patterns are a closed catalog of pre-authored phase sequences. The
//! engine steps through the loaded pattern as time passes and asks the
//! output driver to apply each phase.

pub mod catalog;
pub mod engine;
pub mod flicker;
pub mod phase;

pub use catalog::{CatalogEntry, CATALOG};
pub use engine::{PatternCursor, PatternEngine, TickOutcome};
pub use flicker::{apply_group, ApplyOutcome, FlickerBurst};
pub use phase::{AttackPattern, AttackPhase, PatternError, MAX_PHASES};
