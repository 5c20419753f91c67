//! Umbrella crate for the `pupilfit` workspace.
//!
//! Re-exports the image core and the detector at the top level; the lower
//! stages and the drivers stay reachable through their own modules.

pub use pf_core::*;
pub use pf_detect::*;

pub use pf_contour as contour;
pub use pf_edge as edge;
pub use pf_ellipse as ellipse;
pub use pf_morph as morph;
pub use pf_runner as runner;
