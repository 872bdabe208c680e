// Domain layer: plan models and the ports the generator depends on.

pub mod model;
pub mod ports;
