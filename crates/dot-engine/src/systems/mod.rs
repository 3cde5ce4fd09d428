pub mod color;
pub mod effects;
#[cfg(feature = "vectors")]
pub mod vector;
