//! Parsers for KiCad footprint files

mod footprint;
pub mod sexpr;

pub use footprint::{FootprintElement, KicadFootprint, Pad, ReferenceCircle};
