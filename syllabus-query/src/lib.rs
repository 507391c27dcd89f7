//! # syllabus-query
//!
//! Maps `(raw_text, recent_turns, previous_intent)` to a [`QueryIntent`].
//! Every slot is filled from an ordered `(pattern, value, confidence)` table
//! so each rule can be tested on its own.
//!
//! [`QueryIntent`]: syllabus_core::QueryIntent

pub mod classifier;
pub mod followup;
pub mod inheritance;
pub mod interpreter;
pub mod reflection;
pub mod rules;
pub mod slots;

pub use interpreter::QueryInterpreter;
