//! Store access for course records and the parent aggregate.

use crate::average::recompute_average;
use crate::error::CourseError;
use crate::model::{Course, CreateCourse};
use camp_database::Database;
use camp_domain::constants::{BOOTCAMP_TABLE, COURSE_TABLE};
use camp_kernel::query::content_without_id;
use camp_kernel::safe_nanoid;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct OwnerRow {
    user: String,
}

#[derive(Debug, Clone)]
pub struct CourseRepository {
    db: Database,
}

impl CourseRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the owning user of a bootcamp, or `None` if it does not exist.
    ///
    /// # Errors
    /// Returns [`CourseError::Database`] on store failures.
    pub async fn bootcamp_owner(&self, bootcamp_id: &str) -> Result<Option<String>, CourseError> {
        let row: Option<OwnerRow> = self
            .db
            .query("SELECT user FROM type::thing($tb, $id)")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("id", bootcamp_id.to_owned()))
            .await?
            .take(0)?;

        Ok(row.map(|r| r.user))
    }

    /// Persists a new course under `bootcamp_id`, then recomputes the parent
    /// aggregate. A recompute failure fails the create.
    ///
    /// # Errors
    /// Returns [`CourseError::Database`] on store failures.
    pub async fn create(
        &self,
        payload: CreateCourse,
        bootcamp_id: &str,
        user_id: &str,
    ) -> Result<Course, CourseError> {
        let record = Course {
            id: safe_nanoid!(),
            title: payload.title,
            description: payload.description,
            weeks: payload.weeks,
            tuition: payload.tuition,
            minimum_skill: payload.minimum_skill,
            scholarship_available: payload.scholarship_available,
            bootcamp: bootcamp_id.to_owned(),
            user: user_id.to_owned(),
            created_at: Utc::now(),
        };

        let content = content_without_id(&record)?;
        self.db
            .query("CREATE type::thing($tb, $id) CONTENT $content RETURN NONE")
            .bind(("tb", COURSE_TABLE))
            .bind(("id", record.id.clone()))
            .bind(("content", content))
            .await?
            .check()?;

        self.recompute_parent_average(bootcamp_id).await?;

        debug!(id = %record.id, bootcamp = bootcamp_id, "Course created");
        Ok(record)
    }

    /// Fetches a course by id.
    ///
    /// # Errors
    /// Returns [`CourseError::Database`] on store failures.
    pub async fn get(&self, id: &str) -> Result<Option<Course>, CourseError> {
        let course: Option<Course> = self
            .db
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", COURSE_TABLE))
            .bind(("id", id.to_owned()))
            .await?
            .take(0)?;

        Ok(course)
    }

    /// Merges a partial patch into an existing course, then recomputes the
    /// parent aggregate (the tuition may have changed).
    ///
    /// # Errors
    /// Returns [`CourseError::NotFound`] if the record vanished between the
    /// caller's existence check and the merge.
    pub async fn merge(&self, id: &str, patch: serde_json::Value) -> Result<Course, CourseError> {
        self.db
            .query("UPDATE type::thing($tb, $id) MERGE $patch RETURN NONE")
            .bind(("tb", COURSE_TABLE))
            .bind(("id", id.to_owned()))
            .bind(("patch", patch))
            .await?
            .check()?;

        let course = self.get(id).await?.ok_or_else(|| CourseError::NotFound {
            message: format!("Course {id} disappeared during update").into(),
            context: None,
        })?;

        self.recompute_parent_average(&course.bootcamp).await?;
        Ok(course)
    }

    /// Deletes a course, then recomputes the parent aggregate.
    ///
    /// The recompute is an explicit call on this path, so removal reliably
    /// restores the invariant.
    ///
    /// # Errors
    /// Returns [`CourseError::Database`] on store failures.
    pub async fn delete(&self, course: &Course) -> Result<(), CourseError> {
        self.db
            .query("DELETE type::thing($tb, $id)")
            .bind(("tb", COURSE_TABLE))
            .bind(("id", course.id.clone()))
            .await?
            .check()?;

        self.recompute_parent_average(&course.bootcamp).await?;

        debug!(id = %course.id, bootcamp = %course.bootcamp, "Course deleted");
        Ok(())
    }

    /// Tuitions of all courses currently under `bootcamp_id`.
    ///
    /// # Errors
    /// Returns [`CourseError::Database`] on store failures.
    pub async fn tuitions_for(&self, bootcamp_id: &str) -> Result<Vec<u32>, CourseError> {
        let tuitions: Vec<u32> = self
            .db
            .query("SELECT VALUE tuition FROM type::table($tb) WHERE bootcamp = $bootcamp")
            .bind(("tb", COURSE_TABLE))
            .bind(("bootcamp", bootcamp_id.to_owned()))
            .await?
            .take(0)?;

        Ok(tuitions)
    }

    /// Recomputes and persists the parent's `averageCost` via a direct field
    /// update; the parent document is never loaded.
    ///
    /// # Errors
    /// Returns [`CourseError::Database`] on store failures; callers let this
    /// fail the triggering write rather than swallowing it.
    pub async fn recompute_parent_average(
        &self,
        bootcamp_id: &str,
    ) -> Result<Option<u64>, CourseError> {
        let tuitions = self.tuitions_for(bootcamp_id).await?;
        let average = recompute_average(&tuitions);

        match average {
            Some(value) => {
                self.db
                    .query("UPDATE type::thing($tb, $id) SET averageCost = $avg RETURN NONE")
                    .bind(("tb", BOOTCAMP_TABLE))
                    .bind(("id", bootcamp_id.to_owned()))
                    .bind(("avg", value))
                    .await?
                    .check()?;
            },
            None => {
                self.db
                    .query("UPDATE type::thing($tb, $id) UNSET averageCost RETURN NONE")
                    .bind(("tb", BOOTCAMP_TABLE))
                    .bind(("id", bootcamp_id.to_owned()))
                    .await?
                    .check()?;
            },
        }

        debug!(bootcamp = bootcamp_id, ?average, "Parent average cost recomputed");
        Ok(average)
    }
}
