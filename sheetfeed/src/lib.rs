pub mod cli;
pub mod google;
pub mod load_config;
pub mod logging;
