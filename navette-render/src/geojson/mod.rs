mod geo_serializer;

pub use geo_serializer::{
    create_feature_collection, serialize_plan_as_geojson, Feature, FeatureCollection, Geometry,
};
