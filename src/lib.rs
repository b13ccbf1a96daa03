#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod notation;
mod player;
#[cfg(feature = "std")]
pub mod registry;
mod resolver;
mod ship;
mod shots;
#[cfg(feature = "std")]
pub mod sim;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
#[cfg(feature = "std")]
pub use registry::{SessionKey, SessionRegistry, SessionView, WaitToken};
pub use resolver::{fire, is_sunk, is_won, resolve};
pub use ship::*;
pub use shots::ShotSet;
