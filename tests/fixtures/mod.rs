//! Test fixtures for taxi-geo.
//!
//! Provides real Slovak towns and villages (coordinates from
//! OpenStreetMap) plus matching reference-data documents.

pub mod slovak_places;

pub use slovak_places::*;
