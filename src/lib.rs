//! partcost - machining time and cost estimation from CAD geometry.
//!
//! The crate is the computation core of a part-costing tool: the CAD host
//! hands over a read-only snapshot of a solid ([`geometry::Solid`]) and
//! the core classifies its machinable features, proposes an enclosing
//! stock blank, and estimates machining time by one of two models:
//!
//! - chip-removal flow from cutting parameters and a removal volume
//!   ([`estimate::chip`], fed by [`ops::compute_volume`]);
//! - reconstructed travel length of an existing CAM tool path
//!   ([`estimate::path`]).
//!
//! Everything is a synchronous pure function over the snapshot; nothing
//! here touches the host document.

pub mod costing;
pub mod estimate;
pub mod features;
pub mod geometry;
pub mod ops;
pub mod stock;
pub mod tools;

pub use estimate::{estimate_chip_time, estimate_path_time};
pub use features::{detect, MillingFeatures};
pub use geometry::Solid;
pub use ops::{compute_volume, MachiningOperation};
pub use stock::{propose, StockSpec};
