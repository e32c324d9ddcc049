//! Post-processing engine for fan-driven flow and structure simulations.
//!
//! Three independent analyses are exposed through [`modules`]: force-table
//! statistics for the immersed-coin and sphere studies, and the cantilever
//! beam response synthesis (modal series plus convolution sweep). Numeric
//! kernels live in [`numerics`], chart rendering in [`plotting`].

pub mod domain;
pub mod modules;
pub mod numerics;
pub mod plotting;
