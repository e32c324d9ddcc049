pub mod convolution;
pub mod grid;
pub mod modal;
pub mod roots;
pub mod table;

pub use convolution::{convolve_same, ConvolutionError};
pub use grid::{linspace, FieldMatrix, GridError, SpaceTimeGrid};
pub use modal::{
    frequency_equation, mode_shape, shape_coefficient, ModalBasis, ModalError, TruncatedSeries,
};
pub use roots::{brent_root, sweep_brackets, RootError, RootSweepOptions};
pub use table::{ForceTable, TableError};
