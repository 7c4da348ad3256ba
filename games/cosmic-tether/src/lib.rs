use wasm_bindgen::prelude::*;
use tether_engine::*;

pub mod blackhole;
pub mod config;
pub mod drag;
pub mod energy;
pub mod error;
pub mod game;
pub mod gravity;
pub mod ideal;
pub mod scheduler;
pub mod world;
use game::CosmicTether;

tether_web::export_game!(CosmicTether, "cosmic-tether", vectors);
