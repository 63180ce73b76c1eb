//! Read-only FAT12 image inspector.
//!
//! Loads the boot sector, the first FAT copy and the root directory of a raw
//! disk image, then looks up entries by their on-disk 8.3 name.

pub mod bpb;
pub mod cli;
pub mod config;
pub mod error;
pub mod fat12;

pub use bpb::BootSector;
pub use error::{Fat12Error, Geometry, Result};
pub use fat12::structs::DirectoryEntry;
pub use fat12::volume::{Fat12Volume, FatTable, RootDirectory};
