use std::path::Path;

use clap::{Parser, Subcommand};
use navette_core::{
    input::parse_coordinate_pair,
    model::{FleetOptimizationRequest, LatLng},
};
use serde::{Deserialize, Serialize};

use super::{ops, NavetteAppError, NavetteConfig};

/// Command line client for optimizing shuttle pickup routes with a vehicle routing service
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct NavetteApp {
    /// TOML configuration file with [service], [render], [depot] and [fleet] sections.
    /// values may be overridden with NAVETTE__SECTION__KEY environment variables.
    #[arg(short, long, global = true)]
    pub configuration_file: Option<String>,

    /// routing service base URL, overriding the configuration file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub op: NavetteOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum NavetteOperation {
    /// list the pickup points known to the routing service
    Points {
        /// only keep points within this many kilometers of the depot
        #[arg(short, long)]
        within_km: Option<f64>,
    },
    /// plan routes for the whole fleet over the service's pickup points
    Optimize {
        /// number of drivers, overriding [fleet] num_drivers
        #[arg(short, long)]
        num_drivers: Option<u32>,

        /// passengers per vehicle, overriding [fleet] capacity_per_driver
        #[arg(long)]
        capacity: Option<u32>,

        /// maximum tour length in kilometers, overriding [fleet] max_distance_km
        #[arg(short, long)]
        max_distance_km: Option<f64>,

        /// driver whose route is drawn as active
        #[arg(short, long)]
        driver: Option<u32>,

        /// location on disk to write the response, render plan, GeoJSON and summary
        #[arg(short, long)]
        output_directory: Option<String>,
    },
    /// plan routes over an explicit list of delivery points
    OptimizeRoute {
        /// departure coordinate as "lat,lon"
        #[arg(short, long, value_parser = parse_coordinate_pair, allow_hyphen_values(true))]
        start: Option<LatLng>,

        /// delivery coordinate as "lat,lon". repeat for each point, at least two.
        #[arg(short, long = "point", value_parser = parse_coordinate_pair, allow_hyphen_values(true))]
        points: Vec<LatLng>,

        /// number of vehicles
        #[arg(short, long, default_value = "2")]
        vehicle_count: String,

        /// passengers per vehicle
        #[arg(long)]
        capacity: Option<String>,

        /// maximum tour length in kilometers
        #[arg(short, long)]
        max_distance_km: Option<String>,

        /// driver whose route is drawn as active
        #[arg(short, long)]
        driver: Option<u32>,

        /// location on disk to write the response, render plan, GeoJSON and summary
        #[arg(short, long)]
        output_directory: Option<String>,
    },
    /// list stored route rows grouped by driver
    Routes {
        /// only rows stored under this route id
        id: Option<u64>,
    },
    /// list the stops assigned to one driver
    Driver { driver_id: u32 },
    /// render a saved optimization response without contacting the service
    Render {
        /// JSON file holding an optimization response
        response_file: String,

        /// driver whose route is drawn as active
        #[arg(short, long)]
        driver: Option<u32>,

        /// location on disk to write the render plan, GeoJSON and summary
        #[arg(short, long)]
        output_directory: Option<String>,
    },
}

impl NavetteApp {
    pub fn run(&self) -> Result<(), NavetteAppError> {
        let config = self.configuration()?;
        self.op.run(&config)
    }

    /// the configuration file with environment overrides, then command line
    /// overrides applied.
    pub fn configuration(&self) -> Result<NavetteConfig, NavetteAppError> {
        let mut config = NavetteConfig::from_file(self.configuration_file.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config.service.base_url = base_url.clone();
        }
        Ok(config)
    }
}

impl NavetteOperation {
    pub fn run(&self, config: &NavetteConfig) -> Result<(), NavetteAppError> {
        match self {
            NavetteOperation::Points { within_km } => ops::points(config, *within_km),
            NavetteOperation::Optimize {
                num_drivers,
                capacity,
                max_distance_km,
                driver,
                output_directory,
            } => {
                let request =
                    fleet_overrides(&config.fleet, *num_drivers, *capacity, *max_distance_km)?;
                let outdir = output_directory.as_ref().map(Path::new);
                ops::optimize(config, &request, *driver, outdir)
            }
            NavetteOperation::OptimizeRoute {
                start,
                points,
                vehicle_count,
                capacity,
                max_distance_km,
                driver,
                output_directory,
            } => {
                let collector = ops::collect_points(
                    start.as_ref(),
                    points,
                    vehicle_count,
                    capacity.as_deref(),
                    max_distance_km.as_deref(),
                )?;
                let outdir = output_directory.as_ref().map(Path::new);
                ops::optimize_route(config, &collector, *driver, outdir)
            }
            NavetteOperation::Routes { id } => ops::routes(config, *id),
            NavetteOperation::Driver { driver_id } => ops::driver(config, *driver_id),
            NavetteOperation::Render {
                response_file,
                driver,
                output_directory,
            } => {
                let outdir = output_directory.as_ref().map(Path::new);
                ops::render(config, Path::new(response_file), *driver, outdir)
            }
        }
    }
}

/// `[fleet]` values with the command line values that were given on top.
fn fleet_overrides(
    fleet: &FleetOptimizationRequest,
    num_drivers: Option<u32>,
    capacity: Option<u32>,
    max_distance_km: Option<f64>,
) -> Result<FleetOptimizationRequest, NavetteAppError> {
    ops::fleet_request(
        num_drivers.unwrap_or(fleet.num_drivers),
        capacity.unwrap_or(fleet.capacity_per_driver),
        max_distance_km.unwrap_or(fleet.max_distance_km),
    )
}
