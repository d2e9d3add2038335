pub mod audit;
pub mod bootstrap;
pub mod canvas;
pub mod card;
pub mod config;
pub mod context;
pub mod daily;
pub mod document;
pub mod harbor;
pub mod paths;
pub mod render;
pub mod sections;
pub mod state;
pub mod store;
pub mod templates;
pub mod util;
pub mod views;
