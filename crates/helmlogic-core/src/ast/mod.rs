//! Expression tree definitions

pub mod node;
pub mod relation;

pub use node::Node;
pub use relation::{Connective, Relation};
