#![forbid(unsafe_code)]

pub mod position;
