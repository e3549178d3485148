use camp_derive::api_error;
use std::borrow::Cow;

#[api_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn io_failure() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
}

#[test]
fn source_conversion_via_question_mark() {
    fn run() -> Result<(), DemoError> {
        io_failure()?;
        Ok(())
    }

    let err = run().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
}

#[test]
fn context_is_attached_to_source_results() {
    let err = io_failure().context("Reading demo file").unwrap_err();
    let DemoError::Io { context, .. } = &err else {
        panic!("expected Io variant, got {err:?}");
    };
    assert_eq!(context.as_deref(), Some("Reading demo file"));
    assert!(err.to_string().contains("Reading demo file"));
}

#[test]
fn internal_fallback_from_strings() {
    let from_str: DemoError = "boom".into();
    assert!(matches!(from_str, DemoError::Internal { .. }));

    let from_string: DemoError = String::from("boom").into();
    assert!(from_string.to_string().contains("boom"));
}

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/api_error_pass.rs");
}
