use camp_logger::{Logger, LoggerError};

#[test]
fn second_init_reports_subscriber_conflict() {
    let _logger = Logger::builder().name("first").init().expect("first init should succeed");

    let err = Logger::builder().name("second").init().unwrap_err();
    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
