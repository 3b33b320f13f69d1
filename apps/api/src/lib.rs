pub mod cli;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod pdf_client;
pub mod routes;
pub mod state;
pub mod tailoring;
pub mod uploads;
