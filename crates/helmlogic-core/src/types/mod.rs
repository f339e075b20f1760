//! Value types used during evaluation

pub mod binding;

pub use binding::{Binding, Operand};
