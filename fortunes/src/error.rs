//! Input-validation errors surfaced to the caller before the sweep starts.
//!
//! Everything else that can go wrong (an internal invariant violation) is a
//! bug in this crate, not a condition the caller can correct, and is
//! signaled by panicking with a diagnostic message instead of returning a
//! value here.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum VoronoiError {
    #[error("no sites supplied")]
    EmptySiteSet,

    #[error("site {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("sites {a} and {b} are coincident")]
    CoincidentSites { a: usize, b: usize },

    #[error("site {index} lies outside the bounding rectangle")]
    SiteOutsideBounds { index: usize },

    #[error("bounding rectangle must have positive width and height")]
    DegenerateBounds,
}
