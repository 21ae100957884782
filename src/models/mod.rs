//! Domain types that do not map to a table: the container status machine
//! and the reference-code series.

pub mod container_status;
pub mod reference_code;

pub use container_status::{ContainerStatus, StatusBucket};
pub use reference_code::CodeSeries;
