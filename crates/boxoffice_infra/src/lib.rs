#![forbid(unsafe_code)]

pub mod config;
pub mod gateway;
pub mod journal;

pub fn infra_bootstrapped() -> bool {
    boxoffice_core::crate_bootstrapped()
}
