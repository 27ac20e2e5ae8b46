use marker_track_replay::{Settings, logging};

fn main() {
    let settings = Settings::from_cli();
    let _guard = logging::setup_logging(&settings);
    logging::log_version_info();

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(marker_track_replay::run(settings)) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
