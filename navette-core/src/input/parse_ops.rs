//! parse-and-validate helpers for values typed by a user. every function
//! returns a typed error instead of letting `NaN` or an out-of-range value
//! reach a request.
use super::InputError;
use crate::model::LatLng;

pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const VEHICLE_COUNT: &str = "vehicle count";
pub const CAPACITY: &str = "capacity per driver";
pub const MAX_DISTANCE_KM: &str = "max distance (km)";
pub const PASSENGERS: &str = "passengers";

pub fn parse_latitude(text: &str) -> Result<f64, InputError> {
    parse_f64(LATITUDE, text).and_then(validate_latitude)
}

pub fn parse_longitude(text: &str) -> Result<f64, InputError> {
    parse_f64(LONGITUDE, text).and_then(validate_longitude)
}

/// parses the two text fields of a coordinate form.
pub fn parse_lat_lng(latitude: &str, longitude: &str) -> Result<LatLng, InputError> {
    Ok(LatLng::new(
        parse_latitude(latitude)?,
        parse_longitude(longitude)?,
    ))
}

/// parses a single `lat,lon` string, the format used on the command line.
pub fn parse_coordinate_pair(text: &str) -> Result<LatLng, InputError> {
    match text.split(',').collect::<Vec<_>>()[..] {
        [lat, lon] => parse_lat_lng(lat, lon),
        _ => Err(InputError::MalformedCoordinatePair(text.to_string())),
    }
}

pub fn parse_vehicle_count(text: &str) -> Result<u32, InputError> {
    parse_u32(VEHICLE_COUNT, text).and_then(validate_vehicle_count)
}

pub fn parse_capacity(text: &str) -> Result<u32, InputError> {
    parse_u32(CAPACITY, text).and_then(validate_capacity)
}

pub fn parse_max_distance_km(text: &str) -> Result<f64, InputError> {
    parse_f64(MAX_DISTANCE_KM, text).and_then(validate_max_distance_km)
}

pub fn parse_passenger_count(text: &str) -> Result<u32, InputError> {
    parse_u32(PASSENGERS, text).and_then(validate_passenger_count)
}

pub fn validate_latitude(value: f64) -> Result<f64, InputError> {
    validate_range(LATITUDE, value, -90.0, 90.0, "between -90 and 90")
}

pub fn validate_longitude(value: f64) -> Result<f64, InputError> {
    validate_range(LONGITUDE, value, -180.0, 180.0, "between -180 and 180")
}

pub fn validate_vehicle_count(value: u32) -> Result<u32, InputError> {
    validate_positive(VEHICLE_COUNT, value)
}

pub fn validate_capacity(value: u32) -> Result<u32, InputError> {
    validate_positive(CAPACITY, value)
}

pub fn validate_passenger_count(value: u32) -> Result<u32, InputError> {
    validate_positive(PASSENGERS, value)
}

pub fn validate_max_distance_km(value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field: MAX_DISTANCE_KM,
            value: value.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(InputError::OutOfRange {
            field: MAX_DISTANCE_KM,
            value: value.to_string(),
            expected: "greater than 0",
        });
    }
    Ok(value)
}

fn parse_f64(field: &'static str, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| InputError::NotANumber {
            field,
            value: trimmed.to_string(),
        })?;
    // "NaN" and "inf" parse successfully as f64
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field,
            value: trimmed.to_string(),
        });
    }
    Ok(value)
}

fn parse_u32(field: &'static str, text: &str) -> Result<u32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    let value = trimmed.parse::<i64>().map_err(|_| {
        if trimmed.parse::<f64>().is_ok() {
            InputError::NotAnInteger {
                field,
                value: trimmed.to_string(),
            }
        } else {
            InputError::NotANumber {
                field,
                value: trimmed.to_string(),
            }
        }
    })?;
    u32::try_from(value).map_err(|_| InputError::OutOfRange {
        field,
        value: trimmed.to_string(),
        expected: "a non-negative whole number",
    })
}

fn validate_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field,
            value: value.to_string(),
        });
    }
    if value < min || max < value {
        return Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
            expected,
        });
    }
    Ok(value)
}

fn validate_positive(field: &'static str, value: u32) -> Result<u32, InputError> {
    if value == 0 {
        Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "at least 1",
        })
    } else {
        Ok(value)
    }
}
