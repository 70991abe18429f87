// Domain layer: entities, pure transforms and the ports adapters implement.

pub mod model;
pub mod ports;

pub mod services;
