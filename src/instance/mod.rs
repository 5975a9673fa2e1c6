/// Random instance generation
pub mod generator;
/// Raw signed-integer instances and their validation
pub mod sat_instance;
