// Domain layer: request/response models and the transport port. No network code here.

pub mod model;
pub mod ports;
