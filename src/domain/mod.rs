// Domain layer: value types and ports (interfaces). No calendar logic lives here.

pub mod model;
pub mod ports;
