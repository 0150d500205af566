/* 3rd party libraries */
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::Builder;

/* Custom libraries */
use engine::Engine;

/* Modules */
mod config;
mod console;
mod engine;
mod shared;

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load and validate the configuration
    let config = unwrap_or_exit!(config::load_config());
    info!("Starting elevator with the following parameters:");
    info!("  Floors count      : {}", config.n_floors);
    info!("  Interfloor timeout: {} ms", config.floor_timeout);
    info!("  Door close timeout: {} ms", config.door_timeout);

    // Start the engine thread; it owns all elevator state
    let (handle, events) = engine::channel(config.n_floors);
    let engine = Engine::new(&config, events);
    let engine_thread = Builder::new().name("engine".into());
    let engine_thread = unwrap_or_exit!(
        engine_thread.spawn(move || engine.run()),
        "failed to start engine thread"
    );

    // Ctrl-C requests shutdown through the same event path as `quit`
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let handle = handle.clone();
        let shutdown = shutdown.clone();
        unwrap_or_exit!(
            ctrlc::set_handler(move || {
                info!("Stop signal was caught. Stopping.");
                shutdown.store(true, Ordering::SeqCst);
                handle.request_shutdown();
            }),
            "failed to register the interrupt handler"
        );
    }

    // Command console runs on the main thread until shutdown
    console::run(handle, config.n_floors, shutdown);

    unwrap_or_exit!(engine_thread.join().map_err(|_| "engine thread panicked"));
    info!("Elevator stopped.");
}
