pub mod geojson;
pub mod plan;
pub mod summary;
