pub mod core;
pub mod logging;
pub mod plot;
