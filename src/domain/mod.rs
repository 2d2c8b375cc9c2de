// Domain layer: core models and ports (interfaces). No external dependencies beyond serde/uuid.

pub mod model;
pub mod ports;
