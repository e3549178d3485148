//! Store access for bootcamp records.
//!
//! Every statement targets records through `type::thing`/`type::table` binds;
//! document bodies travel as `CONTENT`/`MERGE` parameters with the `id`
//! stripped, so identity only ever lives in the record pointer.

use crate::error::BootcampError;
use crate::model::{Bootcamp, CreateBootcamp, Location, slugify};
use camp_database::Database;
use camp_domain::constants::{BOOTCAMP_TABLE, COURSE_TABLE};
use camp_domain::geo::GeoPoint;
use camp_kernel::query::content_without_id;
use camp_kernel::safe_nanoid;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

#[derive(Debug, Clone)]
pub struct BootcampRepository {
    db: Database,
}

impl BootcampRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persists a new bootcamp owned by `user_id`.
    ///
    /// The id, slug, and creation timestamp are derived here; `averageCost`
    /// starts absent and is only ever touched by the course recompute.
    ///
    /// # Errors
    /// Returns [`BootcampError::Database`] on store failures.
    pub async fn create(
        &self,
        payload: CreateBootcamp,
        location: Location,
        user_id: &str,
    ) -> Result<Bootcamp, BootcampError> {
        let record = Bootcamp {
            id: safe_nanoid!(),
            slug: slugify(&payload.name),
            name: payload.name,
            description: payload.description,
            website: payload.website,
            phone: payload.phone,
            email: payload.email,
            careers: payload.careers,
            housing: payload.housing,
            job_assistance: payload.job_assistance,
            job_guarantee: payload.job_guarantee,
            accept_gi: payload.accept_gi,
            photo: None,
            average_cost: None,
            location,
            user: user_id.to_owned(),
            created_at: Utc::now(),
        };

        let content = content_without_id(&record)?;
        self.db
            .query("CREATE type::thing($tb, $id) CONTENT $content RETURN NONE")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("id", record.id.clone()))
            .bind(("content", content))
            .await?
            .check()?;

        debug!(id = %record.id, slug = %record.slug, "Bootcamp created");
        Ok(record)
    }

    /// Fetches a bootcamp by id.
    ///
    /// # Errors
    /// Returns [`BootcampError::Database`] on store failures.
    pub async fn get(&self, id: &str) -> Result<Option<Bootcamp>, BootcampError> {
        let bootcamp: Option<Bootcamp> = self
            .db
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("id", id.to_owned()))
            .await?
            .take(0)?;

        Ok(bootcamp)
    }

    /// Merges a partial patch into an existing bootcamp and returns the result.
    ///
    /// # Errors
    /// Returns [`BootcampError::NotFound`] if the record vanished between the
    /// caller's existence check and the merge.
    pub async fn merge(
        &self,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<Bootcamp, BootcampError> {
        self.db
            .query("UPDATE type::thing($tb, $id) MERGE $patch RETURN NONE")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("id", id.to_owned()))
            .bind(("patch", patch))
            .await?
            .check()?;

        self.get(id).await?.ok_or_else(|| BootcampError::NotFound {
            message: format!("Bootcamp {id} disappeared during update").into(),
            context: None,
        })
    }

    /// Deletes a bootcamp and cascades to its courses.
    ///
    /// The parent aggregate needs no recompute afterwards: the record carrying
    /// it is gone.
    ///
    /// # Errors
    /// Returns [`BootcampError::Database`] on store failures.
    pub async fn delete(&self, id: &str) -> Result<(), BootcampError> {
        self.db
            .query("DELETE type::table($course_tb) WHERE bootcamp = $id")
            .bind(("course_tb", COURSE_TABLE))
            .bind(("id", id.to_owned()))
            .await?
            .check()?;

        self.db
            .query("DELETE type::thing($tb, $id)")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("id", id.to_owned()))
            .await?
            .check()?;

        debug!(id, "Bootcamp deleted with course cascade");
        Ok(())
    }

    /// Counts bootcamps owned by `user_id` (for the one-per-publisher rule).
    ///
    /// # Errors
    /// Returns [`BootcampError::Database`] on store failures.
    pub async fn count_owned_by(&self, user_id: &str) -> Result<u64, BootcampError> {
        let row: Option<CountRow> = self
            .db
            .query("SELECT count() AS total FROM type::table($tb) WHERE user = $user GROUP ALL")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("user", user_id.to_owned()))
            .await?
            .take(0)?;

        Ok(row.map_or(0, |r| r.total))
    }

    /// Returns bootcamps whose location lies within `radius_meters` of `center`.
    ///
    /// # Errors
    /// Returns [`BootcampError::Database`] on store failures.
    pub async fn within_radius(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<Bootcamp>, BootcampError> {
        let bootcamps: Vec<Bootcamp> = self
            .db
            .query(
                "SELECT *, record::id(id) AS id FROM type::table($tb) \
                 WHERE geo::distance(type::point(location.coordinates), type::point($center)) <= $radius",
            )
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("center", center.coordinates()))
            .bind(("radius", radius_meters))
            .await?
            .take(0)?;

        Ok(bootcamps)
    }

    /// Records the stored photo file name on the bootcamp.
    ///
    /// # Errors
    /// Returns [`BootcampError::Database`] on store failures.
    pub async fn set_photo(&self, id: &str, file_name: &str) -> Result<(), BootcampError> {
        self.db
            .query("UPDATE type::thing($tb, $id) SET photo = $photo RETURN NONE")
            .bind(("tb", BOOTCAMP_TABLE))
            .bind(("id", id.to_owned()))
            .bind(("photo", file_name.to_owned()))
            .await?
            .check()?;

        Ok(())
    }
}
