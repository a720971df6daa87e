// Domain layer: lead models and ports. No HTTP here.

pub mod model;
pub mod ports;
