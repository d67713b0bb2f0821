//! Descriptive analytics on the RRG plane: strength grade and heading.
//!
//! Neither feeds the rule table; both are reported alongside signals.

pub mod heading;
pub mod strength;

pub use heading::Heading;
pub use strength::Strength;
