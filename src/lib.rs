// Library exports for the generator binary and tests
pub mod config;
pub mod constants;
pub mod generator;
pub mod icns;
pub mod ico_bundle;
pub mod render;
