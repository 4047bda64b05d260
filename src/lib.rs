#[macro_use]
extern crate gfx;

pub mod config;
pub mod data;
pub mod rendering;
