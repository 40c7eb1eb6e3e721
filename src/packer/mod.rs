//! Placement oracles. Currently a single strategy (the flexible raster
//! packer); kept as its own module so alternative placement strategies can
//! be added alongside it without touching the driver code in [`crate::aco`]
//! and [`crate::ga`].

pub mod flexible;

pub use flexible::pack;
