pub mod analyze;
pub mod crack;
pub mod transform;
