use std::borrow::Cow;

#[camp_derive::api_error]
pub enum RecordIdError {
    #[error("Record id validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

const MAX_ID_LENGTH: usize = 36;

/// Validates the shape of a client-supplied record id.
///
/// Generated ids come from `safe_nanoid!`, but seeded fixtures may carry their
/// own, so the guard accepts any reasonable identifier: ASCII alphanumerics,
/// `-`, and `_`, up to 36 characters. Anything else is rejected before the id
/// ever reaches a statement.
///
/// # Errors
/// Returns [`RecordIdError::Validation`] for empty, oversized, or
/// out-of-alphabet identifiers.
pub fn verify_record_id(id: impl AsRef<str>) -> Result<String, RecordIdError> {
    let id = id.as_ref();

    if id.is_empty() || id.len() > MAX_ID_LENGTH {
        return Err(RecordIdError::Validation {
            message: format!("Id must be 1..={MAX_ID_LENGTH} characters").into(),
            context: None,
        });
    }

    if !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return Err(RecordIdError::Validation {
            message: format!("Id '{id}' contains unsupported characters").into(),
            context: None,
        });
    }

    Ok(id.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nanoid_shaped_ids_pass() {
        assert_eq!(verify_record_id("d7K2mPq9XbNc").unwrap(), "d7K2mPq9XbNc");
        assert_eq!(verify_record_id("seed-bootcamp_1").unwrap(), "seed-bootcamp_1");
    }

    #[test]
    fn empty_and_oversized_ids_fail() {
        assert!(verify_record_id("").is_err());
        assert!(verify_record_id("x".repeat(37)).is_err());
    }

    #[test]
    fn statement_metacharacters_fail() {
        assert!(verify_record_id("abc;DROP TABLE").is_err());
        assert!(verify_record_id("a b").is_err());
        assert!(verify_record_id("bootcamp:123").is_err());
    }
}
