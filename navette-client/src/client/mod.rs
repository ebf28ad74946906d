mod client_config;
mod endpoint;
mod error;
mod routing_client;
mod routing_service;

pub use client_config::RoutingServiceConfig;
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use routing_client::RoutingServiceClient;
pub use routing_service::RoutingService;
