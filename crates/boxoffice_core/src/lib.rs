#![forbid(unsafe_code)]

pub mod domain;
pub mod policy;
pub mod purchase;

pub fn crate_bootstrapped() -> bool {
    true
}
