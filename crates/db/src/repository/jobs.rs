//! Job CRUD operations.

use tracing::{debug, instrument};

use crate::executor::{from_row, Executor};
use crate::filters::JobFilter;
use crate::models::{Job, NewJob};
use crate::sql::{build_set_clause, FieldMap, SqlValue, UpdatePayload};
use crate::DbError;

pub const JOB_FIELDS: FieldMap = FieldMap::new(&[("companyHandle", "company_handle")]);

const RETURNING: &str = r#"id, title, salary, equity, company_handle AS "companyHandle""#;

/// Insert a new job posting. Ids are generated by the database.
#[instrument(skip(db, job), fields(company = %job.company_handle))]
pub async fn create(db: &dyn Executor, job: &NewJob) -> Result<Job, DbError> {
    let sql = format!(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING {RETURNING}
        "#
    );
    let rows = db
        .query(
            &sql,
            &[
                SqlValue::from(job.title.as_str()),
                job.salary.into(),
                job.equity.into(),
                job.company_handle.as_str().into(),
            ],
        )
        .await?;

    let row = rows.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    from_row(row)
}

/// Return every job matching `filter`, ordered by id.
#[instrument(skip(db))]
pub async fn find_all(db: &dyn Executor, filter: &JobFilter) -> Result<Vec<Job>, DbError> {
    let clause = filter.where_clause()?;
    let sql = format!(
        r#"
        SELECT {RETURNING}
        FROM jobs
        {where_clause}
        ORDER BY id
        "#,
        where_clause = clause.fragment,
    );

    let rows = db.query(&sql, &clause.params).await?;
    debug!(count = rows.len(), "jobs listed");
    rows.into_iter().map(from_row).collect()
}

#[instrument(skip(db))]
pub async fn get(db: &dyn Executor, id: i32) -> Result<Job, DbError> {
    let sql = format!("SELECT {RETURNING} FROM jobs WHERE id = $1");
    let row = db
        .query(&sql, &[SqlValue::from(id)])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound(format!("No job: {id}")))?;
    from_row(row)
}

/// Apply a partial update to a job.
///
/// Returns `DbError::InvalidArgument` for an empty payload and
/// `DbError::NotFound` if no job has this id.
#[instrument(skip(db, payload), fields(fields = payload.len()))]
pub async fn update(db: &dyn Executor, id: i32, payload: &UpdatePayload) -> Result<Job, DbError> {
    let set = build_set_clause(payload, &JOB_FIELDS)?;
    let sql = format!(
        r#"
        UPDATE jobs
        SET {set_cols}
        WHERE id = ${id_idx}
        RETURNING {RETURNING}
        "#,
        set_cols = set.fragment,
        id_idx = set.next_placeholder(),
    );

    let mut params = set.params;
    params.push(id.into());

    let row = db
        .query(&sql, &params)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound(format!("No job: {id}")))?;
    from_row(row)
}

/// Returns `DbError::NotFound` if no row was deleted.
#[instrument(skip(db))]
pub async fn remove(db: &dyn Executor, id: i32) -> Result<(), DbError> {
    let rows = db
        .query("DELETE FROM jobs WHERE id = $1 RETURNING id", &[SqlValue::from(id)])
        .await?;

    if rows.is_empty() {
        return Err(DbError::NotFound(format!("No job: {id}")));
    }

    Ok(())
}
