//! # mtbs-frame
//!
//! In-memory record table for MTBS burned-area perimeters, a shapefile reader
//! that produces it, and the cleaning transforms applied before analysis.
//!
//! Every transform takes a [`Dataset`] by reference and returns a new one, so
//! a cleaning pipeline is a plain chain of function calls:
//!
//! ```no_run
//! use mtbs_frame::{read_shapefile, transform};
//!
//! let perimeters = read_shapefile("data/inputs/mtbs_perims_DD.shp")?;
//! let wildfires = transform::filter_rows(&perimeters, "Incid_Type", &["Wildfire", "Out of area response"])?;
//! let wildfires = transform::derive_region_code(&wildfires)?;
//! let wildfires = transform::derive_area(&wildfires)?;
//! let wildfires = transform::normalise_columns(&wildfires, &["BurnBndAc"])?;
//! println!("{} wildfires", wildfires.len());
//! # Ok::<(), mtbs_frame::FrameError>(())
//! ```

mod dataset;
mod error;
mod reader;
pub mod transform;
mod value;

pub use dataset::{Dataset, GEOMETRY_COLUMN};
pub use error::FrameError;
pub use reader::read_shapefile;
pub use value::Value;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, FrameError>;
