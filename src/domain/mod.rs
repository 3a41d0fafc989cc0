/// Domain layer: pure models and the ports the rest of the crate plugs
/// into.
pub mod models;
pub mod ports;
