pub mod app;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod game_loop;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
