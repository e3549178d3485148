//! Idempotent schema bootstrap.
//!
//! Every statement is `IF NOT EXISTS`, so re-running the bootstrap against an
//! already-provisioned database is a no-op. Tables stay schemaless; the API
//! layer owns validation.

use crate::error::{DatabaseError, DatabaseErrorExt};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tracing::debug;

#[derive(Debug)]
struct SchemaStatement {
    slice: &'static str,
    ddl: &'static str,
}

const SCHEMA: &[SchemaStatement] = &[
    SchemaStatement { slice: "bootcamps", ddl: "DEFINE TABLE IF NOT EXISTS bootcamp SCHEMALESS" },
    SchemaStatement {
        slice: "bootcamps",
        ddl: "DEFINE INDEX IF NOT EXISTS bootcamp_user ON TABLE bootcamp FIELDS user",
    },
    SchemaStatement { slice: "courses", ddl: "DEFINE TABLE IF NOT EXISTS course SCHEMALESS" },
    SchemaStatement {
        slice: "courses",
        ddl: "DEFINE INDEX IF NOT EXISTS course_bootcamp ON TABLE course FIELDS bootcamp",
    },
];

#[derive(Debug)]
pub(crate) struct SchemaRunner {
    db: Surreal<Any>,
}

impl SchemaRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<usize, DatabaseError> {
        for statement in SCHEMA {
            self.db
                .query(statement.ddl)
                .await
                .context(format!("Applying schema for slice '{}'", statement.slice))?
                .check()
                .map_err(|e| DatabaseError::Surreal {
                    source: e,
                    context: Some(format!("Schema rejected for slice '{}'", statement.slice).into()),
                })?;
            debug!(slice = statement.slice, ddl = statement.ddl, "Schema statement applied");
        }

        Ok(SCHEMA.len())
    }
}
