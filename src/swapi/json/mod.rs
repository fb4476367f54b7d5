//! JSON wrappers for common SWAPI model objects.

pub mod film;
pub mod page;
pub mod people;
