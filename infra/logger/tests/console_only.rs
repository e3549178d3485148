use camp_logger::{LevelFilter, Logger};

#[test]
fn console_only_init_succeeds() {
    let logger = Logger::builder()
        .name("console-only")
        .console(true)
        .level(LevelFilter::DEBUG)
        .init()
        .expect("console logger should initialize");

    assert!(logger.guard().is_none());
    tracing::info!("console logging is live");
}
