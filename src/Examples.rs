//! examples of usage of RustedQuad
/// equal and unequal interval integration examples
pub mod quadrature_examples;
