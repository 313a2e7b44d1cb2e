//! Machining-time estimation models.
//!
//! Three independent models, all fed by external data:
//! - [`chip`]: chip-removal-flow model from cutting parameters plus a
//!   removal volume.
//! - [`path`]: travel-length model reconstructed from a motion-command
//!   sequence (an existing CAM tool path).
//! - [`passes`]: quick pass-count/equivalent-length models for facing,
//!   contouring and pocketing.
//!
//! Shared policy: when a formula is mathematically undefined (zero feed,
//! zero chip flow), the model fails loudly instead of returning zero, so
//! callers can tell "no time needed" from "misconfigured".

pub mod chip;
pub mod passes;
pub mod path;

pub use chip::{estimate_chip_time, ChipTimeEstimate, CuttingParameters};
pub use passes::{contour_time, depth_passes, facing_time, pocket_time, radial_passes};
pub use path::{estimate_path_time, MotionCommand, PathTimeEstimate};
