//! Core VAT rule model.
//!
//! Regions and jurisdictions, layered policy tables, the process-wide
//! rule book and the per-jurisdiction VAT engine.

mod assessment;
mod engine;
mod error;
mod policy;
mod request;
mod rulebook;
mod types;

pub use assessment::*;
pub use engine::{Slab, UK_SLABS, assess, compute_vat};
pub use error::*;
pub use policy::*;
pub use request::*;
pub use rulebook::*;
pub use types::*;
