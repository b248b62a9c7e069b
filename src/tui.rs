//! Hot-seat terminal front end. Holds no rules; everything goes through
//! [`crate::game::Game`].

pub mod app;
pub mod controller;
mod ui;
