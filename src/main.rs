mod chooser;
mod config;
mod controller;
mod engine;
mod error;
mod logging;
mod mpris;
mod runtime;
mod track;
mod ui;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("lonetrack: {e}");
        std::process::exit(1);
    }
}
