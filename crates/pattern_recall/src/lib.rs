//! Pattern Recall - a visual memory puzzle engine.
//!
//! A 5x5 grid briefly shows a pattern; the player reproduces it from memory
//! and the attempt is scored. This crate holds the pure game logic and
//! nothing else: no timers, no I/O, no rendering.
//!
//! # Architecture
//!
//! - **Catalog**: ten fixed levels, each a pure rule producing a [`Pattern`]
//! - **Session**: the observe → guess → result state machine
//! - **Evaluation**: set comparison of a selection against the target
//! - **Invariants**: properties asserted after every transition in debug builds
//! - **View**: a serializable snapshot for renderers
//!
//! # Example
//!
//! ```
//! use pattern_recall::{Phase, Session, OBSERVE_TICKS};
//!
//! let mut session = Session::standard();
//! for _ in 0..OBSERVE_TICKS {
//!     session.tick();
//! }
//! assert_eq!(session.phase(), Phase::Guessing);
//!
//! for index in session.target().indices() {
//!     session.toggle(index).unwrap();
//! }
//! session.submit();
//! assert!(session.is_exact_match());
//! assert_eq!(session.score(), 100);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod command;
mod error;
mod evaluation;
mod grid;
pub mod invariants;
mod pattern;
mod phase;
mod session;
mod view;

// Crate-level exports - Board geometry
pub use grid::{CELL_COUNT, Cell, Direction, GRID_SIZE};
pub use pattern::Pattern;

// Crate-level exports - Levels
pub use catalog::{Catalog, Level, PatternRule, is_prime};

// Crate-level exports - State machine
pub use command::Command;
pub use evaluation::{Evaluation, is_exact_match};
pub use phase::{EntryId, Phase, Transition};
pub use session::{MATCH_AWARD, OBSERVE_TICKS, Session};

// Crate-level exports - Renderer view
pub use view::{CellState, ResultAction, ResultSummary, SessionView};

// Crate-level exports - Errors
pub use error::{CatalogError, GridError, SessionError};
