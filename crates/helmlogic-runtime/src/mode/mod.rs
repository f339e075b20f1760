//! Guarded mode assignments
//!
//! A [`ModeRule`] assigns a value to a mode variable when all of its guard
//! conditions hold. A [`ModeSet`] evaluates an ordered list of rules once
//! per cycle, letting later rules see the values assigned by earlier ones.

pub mod rule;
pub mod set;

pub use rule::ModeRule;
pub use set::ModeSet;
