use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
pub mod controller;
pub mod decor;
pub mod error;
pub mod game;
pub mod orbit;
pub mod picking;
pub mod registry;
use game::SolarSystem;

orrery_web::export_sim!(SolarSystem, "solar-system");
