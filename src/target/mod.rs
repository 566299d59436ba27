//! Python rendering helpers shared by the emitters.

pub mod literal;
pub mod writer;

pub use literal::*;
pub use writer::*;
