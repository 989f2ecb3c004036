//! Snake on a bounded grid.
//!
//! The simulation core ([`grid`], [`snake`], [`collision`], [`food`],
//! [`game`]) is deterministic and knows nothing about terminals. The driver
//! pieces ([`clock`], [`input`], [`renderer`], [`terminal_runtime`], [`ui`])
//! read session state and call its transitions without adding game rules.

pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
