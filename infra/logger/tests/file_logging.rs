use camp_logger::{LevelFilter, Logger};

#[test]
fn file_logging_creates_rotated_log_file() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let log_dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("file-test")
        .console(false)
        .path(&log_dir)
        .level(LevelFilter::INFO)
        .init()
        .expect("file logger should initialize");

    assert!(logger.guard().is_some());
    tracing::info!("hello from the file logger");

    // Dropping the handle flushes the non-blocking worker.
    drop(logger);

    let entries: Vec<_> = std::fs::read_dir(&log_dir)
        .expect("log dir should exist")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();

    assert!(
        entries.iter().any(|name| name.starts_with("file-test") && name.ends_with("log")),
        "expected a rotated log file, found {entries:?}"
    );
}
