//! Terminal client that formats text through a remote `/format` service and
//! moves it in and out of the system clipboard.

pub mod actions;
pub mod app;
pub mod clipboard;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod controller;
pub mod drivers;
pub mod event_loop;
pub mod headless;
pub mod keybindings;
pub mod service;
pub mod state;
pub mod status;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
