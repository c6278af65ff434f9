pub mod browser;
pub mod config;
pub mod controller;
pub mod form;
pub mod generator;
pub mod models;
pub mod output;
pub mod render;
