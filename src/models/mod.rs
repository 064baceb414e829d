//! Core record types shared by the mapping, builder and storage layers
//!
//! - [`SourceRow`]: one object from the ARS3D CSV export
//! - [`AttributeList`]: the ordered column/value pairs of one Arachne record

pub mod attributes;
pub mod row;

pub use attributes::{AttributeList, AttributeValue};
pub use row::SourceRow;
