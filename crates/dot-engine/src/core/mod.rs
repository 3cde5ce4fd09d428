pub mod time;
pub mod viewport;
