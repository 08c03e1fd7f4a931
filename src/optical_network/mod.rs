// models an optical fiber network as a directed multigraph of endpoints and links
// every physical connection appears once per direction, both directions share one length
// a probe signal folded along a path accumulates fiber latency and ase noise

pub mod elements;
pub mod network;
pub mod report;
pub mod signal;

pub use elements::{Endpoint,Link};
pub use network::{EndpointDescription,Topology,TopologyDescription};
pub use report::{PathFailure,PathRecord,WeightedPaths,weighted_paths};
pub use signal::SignalState;

use lazy_static::lazy_static;
use thiserror::Error;

//constants that will not be changed

//unit in m/s
pub(crate) const C_SPEED_OF_LIGHT:f64 = 299792458.0;

//amplified spontaneous emission proxy, unit in 1/(m·W)
//noise added per link = ASE_COEFFICIENT * signal_power * length
pub(crate) const ASE_COEFFICIENT:f64 = 1e-9;

//length, unit in meters
pub type DistanceM = f64;
//latency, unit in seconds
pub type Seconds = f64;
//power, unit in watts, must be greater than 0
pub type PowerWatt = f64;

//free parameters, that can be tweaked
lazy_static! {
    //signals travel through fiber at two thirds of vacuum light speed, unit in m/s
    pub(crate) static ref fiber_velocity:f64 = (2.0/3.0)*C_SPEED_OF_LIGHT;
    //canonical probe power used by the report generator, 1mW
    pub(crate) static ref probe_power:PowerWatt = 0.001;
}

#[derive(Error,Debug)]
pub enum NetworkError {
    #[error("Endpoint {label} declares a connection to {neighbour}, which is not in the topology")]
    MalformedTopology{label:String,neighbour:String},
    #[error("Endpoint {label} has a missing or non-finite position")]
    InvalidGeometry{label:String},
    #[error("Endpoint {label} is not part of the topology")]
    UnknownEndpoint{label:String},
    #[error("No wired link from {from} to {to}, the supplied path is not connected")]
    DisconnectedPath{from:String,to:String},
}

pub(crate) type Result<T> = std::result::Result<T,NetworkError>;
