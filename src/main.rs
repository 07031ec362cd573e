mod app;
mod audio;
mod config;
mod controller;
mod library;
mod mpris;
mod runtime;
mod service;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
