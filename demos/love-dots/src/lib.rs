use wasm_bindgen::prelude::*;
use dot_engine::*;

mod game;
mod music;
mod points;
mod proposal;
mod tracing;
mod view;
use game::LoveDots;

dot_web::export_game!(LoveDots, "love-dots", vectors);
