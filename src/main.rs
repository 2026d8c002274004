mod config;
mod dashboard;
mod display;
mod error;
mod session;
mod store;
mod teams;
mod web;

use config::{Config, Mode};
use dashboard::{derive_status, generate_courts};
use display::{render_courts, render_session};
use store::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env(&args);

    if let Mode::Web { port } = config.mode {
        log::info!("Starting web server on {}:{}", config.bind_addr, port);
        println!("Access the dashboard at http://localhost:{}", port);

        web::start_server(config, port).await?;
        return Ok(());
    }

    // Console mode: print what is stored plus one sample court board
    let store = SessionStore::new(&config.data_file, config.host.clone(), config.cutoff_hour);
    let state = store.load()?;
    println!("Session file: {}", store.path().display());

    print!("{}", render_session(&state));

    let courts = generate_courts(&mut rand::thread_rng());
    print!("{}", render_courts(&courts, &derive_status(&courts)));

    println!("\nRun with `web [port]` to serve the dashboard.");
    Ok(())
}
