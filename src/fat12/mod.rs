pub mod sector;
pub mod structs;
pub mod volume;
