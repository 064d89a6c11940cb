use log::info;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    stackle::events::init_event_bus();
    info!("starting stackle native shell");

    #[cfg(target_os = "macos")]
    stackle::platform::run();

    #[cfg(not(target_os = "macos"))]
    log::error!("the stackle shell only runs on macOS");
}
