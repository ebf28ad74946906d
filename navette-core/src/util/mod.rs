pub mod geo_utils;
mod region;

pub use region::Region;
