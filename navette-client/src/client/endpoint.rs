/// the routing service endpoints this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    OptimizeRoute,
    Optimize,
    Points,
    Routes,
    RoutesById(u64),
    Driver(u32),
}

impl Endpoint {
    /// path relative to the configured base URL, without a leading slash.
    pub fn path(&self) -> String {
        match self {
            Endpoint::OptimizeRoute => String::from("optimize_route"),
            Endpoint::Optimize => String::from("optimize"),
            Endpoint::Points => String::from("points"),
            Endpoint::Routes => String::from("routes"),
            Endpoint::RoutesById(id) => format!("routes/{id}"),
            Endpoint::Driver(driver_id) => format!("driver/{driver_id}"),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.path())
    }
}
