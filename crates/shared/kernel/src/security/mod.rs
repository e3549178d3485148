pub mod identifier;

pub use identifier::{RecordIdError, RecordIdErrorExt, verify_record_id};
