//! taxi-geo core
//!
//! Distance, price and slug resolution for a taxi-service directory of
//! Slovak and Czech towns.

pub mod traits;
pub mod place;
pub mod haversine;
pub mod distance_table;
pub mod polyline;
pub mod routing;
pub mod osrm;
pub mod ors;
pub mod osrm_data;
pub mod resolver;
pub mod pricing;
pub mod slug;
pub mod directory;
pub mod nearby;
pub mod routes;
