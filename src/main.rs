fn main() {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let channels = chime_bridge::BridgeChannels::default();
    chime_backend::run(channels.backend_rx, channels.backend_tx);
    chime_console::run(channels.driver_rx, channels.driver_tx).expect("failed to run console");
}
