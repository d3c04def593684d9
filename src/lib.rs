//! Loaders that normalize JPL's two near-Earth-object datasets into
//! fixed-shape, in-memory record collections.
//!
//! Two sources, two loaders, no coupling between them:
//!
//! * [`load_neos`] reads the tabular NEO catalog (CSV) into a
//!   `Vec<`[`NearEarthObject`]`>`.
//! * [`load_approaches`] reads the close-approach catalog (JSON, a field
//!   manifest plus positional records) into a `Vec<`[`CloseApproach`]`>`.
//!
//! Both collections share the string `designation` as their join key; a
//! downstream index is expected to resolve it, this crate does not.
//! Missing numeric values become the `f64::NAN` sentinel and missing text
//! becomes the empty string, so every record always has all of its fields.
//! Shape problems (an unopenable file, a row with the wrong field count)
//! abort the whole load with a [`LoadError`] rather than dropping rows.

pub mod data;
pub mod error;

pub use data::loader::{
    load_approaches, load_approaches_with, load_neos, load_neos_with, FieldAccess,
};
pub use data::model::{CloseApproach, NearEarthObject};
pub use error::{LoadError, Result};
