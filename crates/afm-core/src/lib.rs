pub mod config;
pub mod logging;

pub mod expand;
pub mod mirror;
pub mod path_model;
pub mod remote;
