// Domain layer: core models and ports (interfaces). No transport or storage details here.

pub mod model;
pub mod ports;
