//! Concrete model types built on [`crate::ModelSchema`].

pub mod campaign;

pub use campaign::Campaign;
