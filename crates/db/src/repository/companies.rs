//! Company CRUD operations.

use tracing::{debug, instrument};

use crate::executor::{from_row, Executor};
use crate::filters::CompanyFilter;
use crate::models::{Company, CompanyDetail, Job, NewCompany};
use crate::sql::{build_set_clause, FieldMap, SqlValue, UpdatePayload};
use crate::DbError;

/// External field → `companies` column, for fields whose names differ.
pub const COMPANY_FIELDS: FieldMap = FieldMap::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

const RETURNING: &str = r#"handle, name, description, num_employees AS "numEmployees", logo_url AS "logoUrl""#;

/// Insert a new company.
///
/// Returns `DbError::AlreadyExists` if the handle is taken. The existence
/// check and the insert are separate statements.
#[instrument(skip(db, company), fields(handle = %company.handle))]
pub async fn create(db: &dyn Executor, company: &NewCompany) -> Result<Company, DbError> {
    let duplicate = db
        .query(
            "SELECT handle FROM companies WHERE handle = $1",
            &[SqlValue::from(company.handle.as_str())],
        )
        .await?;
    if !duplicate.is_empty() {
        return Err(DbError::AlreadyExists(format!(
            "Duplicate company: {}",
            company.handle
        )));
    }

    let sql = format!(
        r#"
        INSERT INTO companies (handle, name, description, num_employees, logo_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {RETURNING}
        "#
    );
    let rows = db
        .query(
            &sql,
            &[
                SqlValue::from(company.handle.as_str()),
                company.name.as_str().into(),
                company.description.as_str().into(),
                company.num_employees.into(),
                company.logo_url.clone().into(),
            ],
        )
        .await?;

    let row = rows.into_iter().next().ok_or(sqlx::Error::RowNotFound)?;
    from_row(row)
}

/// Return every company matching `filter`, ordered by name.
#[instrument(skip(db))]
pub async fn find_all(db: &dyn Executor, filter: &CompanyFilter) -> Result<Vec<Company>, DbError> {
    let clause = filter.where_clause()?;
    let sql = format!(
        r#"
        SELECT {RETURNING}
        FROM companies
        {where_clause}
        ORDER BY name
        "#,
        where_clause = clause.fragment,
    );

    let rows = db.query(&sql, &clause.params).await?;
    debug!(count = rows.len(), "companies listed");
    rows.into_iter().map(from_row).collect()
}

/// Job columns of one `companies LEFT JOIN jobs` row.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinedJob {
    job_id: Option<i32>,
    job_title: Option<String>,
    job_salary: Option<i32>,
    job_equity: Option<rust_decimal::Decimal>,
}

/// Fetch a single company and its jobs.
///
/// `jobs` is empty (not absent) for a company without postings.
#[instrument(skip(db))]
pub async fn get(db: &dyn Executor, handle: &str) -> Result<CompanyDetail, DbError> {
    let rows = db
        .query(
            r#"
            SELECT c.handle,
                   c.name,
                   c.description,
                   c.num_employees AS "numEmployees",
                   c.logo_url AS "logoUrl",
                   j.id AS "jobId",
                   j.title AS "jobTitle",
                   j.salary AS "jobSalary",
                   j.equity AS "jobEquity"
            FROM companies AS c
            LEFT OUTER JOIN jobs AS j ON j.company_handle = c.handle
            WHERE c.handle = $1
            ORDER BY j.id
            "#,
            &[SqlValue::from(handle)],
        )
        .await?;

    let first = rows
        .first()
        .cloned()
        .ok_or_else(|| DbError::NotFound(format!("No company: {handle}")))?;
    let company: Company = from_row(first.clone())?;

    // An outer join with no match still yields one row, with a null job id.
    let joined: JoinedJob = from_row(first)?;
    let jobs = if joined.job_id.is_none() {
        Vec::new()
    } else {
        let mut jobs = Vec::with_capacity(rows.len());
        for row in rows {
            let joined: JoinedJob = from_row(row)?;
            if let Some(id) = joined.job_id {
                jobs.push(Job {
                    id,
                    title: joined.job_title.unwrap_or_default(),
                    salary: joined.job_salary,
                    equity: joined.job_equity,
                    company_handle: company.handle.clone(),
                });
            }
        }
        jobs
    };

    Ok(CompanyDetail { company, jobs })
}

/// Apply a partial update to a company.
///
/// Returns `DbError::InvalidArgument` for an empty payload and
/// `DbError::NotFound` if no company has this handle.
#[instrument(skip(db, payload), fields(fields = payload.len()))]
pub async fn update(
    db: &dyn Executor,
    handle: &str,
    payload: &UpdatePayload,
) -> Result<Company, DbError> {
    let set = build_set_clause(payload, &COMPANY_FIELDS)?;
    let sql = format!(
        r#"
        UPDATE companies
        SET {set_cols}
        WHERE handle = ${handle_idx}
        RETURNING {RETURNING}
        "#,
        set_cols = set.fragment,
        handle_idx = set.next_placeholder(),
    );

    let mut params = set.params;
    params.push(handle.into());

    let row = db
        .query(&sql, &params)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DbError::NotFound(format!("No company: {handle}")))?;
    from_row(row)
}

/// Permanently delete a company (its jobs cascade).
///
/// Returns `DbError::NotFound` if no row was deleted.
#[instrument(skip(db))]
pub async fn remove(db: &dyn Executor, handle: &str) -> Result<(), DbError> {
    let rows = db
        .query(
            "DELETE FROM companies WHERE handle = $1 RETURNING handle",
            &[SqlValue::from(handle)],
        )
        .await?;

    if rows.is_empty() {
        return Err(DbError::NotFound(format!("No company: {handle}")));
    }

    Ok(())
}
