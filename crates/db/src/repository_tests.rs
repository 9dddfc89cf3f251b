//! Repository tests against `MockExecutor`.
//!
//! These check the statements each operation issues and how returned rows
//! (or their absence) are mapped, without a live Postgres.

use rust_decimal::Decimal;
use serde_json::json;

use crate::filters::{CompanyFilter, JobFilter};
use crate::mock::MockExecutor;
use crate::models::{NewCompany, NewJob};
use crate::repository::{companies, jobs};
use crate::sql::{SqlValue, UpdatePayload};
use crate::DbError;

fn c1_row() -> serde_json::Value {
    json!({
        "handle": "c1",
        "name": "C1",
        "description": "Desc1",
        "numEmployees": 1,
        "logoUrl": "http://c1.img",
    })
}

fn new_company() -> NewCompany {
    NewCompany {
        handle: "new".into(),
        name: "New".into(),
        description: "New Description".into(),
        num_employees: Some(1),
        logo_url: None,
    }
}

// ============================================================
// companies
// ============================================================

#[tokio::test]
async fn create_company_checks_for_duplicates_then_inserts() {
    let db = MockExecutor::new().with_no_rows().with_rows(vec![json!({
        "handle": "new",
        "name": "New",
        "description": "New Description",
        "numEmployees": 1,
        "logoUrl": null,
    })]);

    let company = companies::create(&db, &new_company()).await.unwrap();
    assert_eq!(company.handle, "new");
    assert_eq!(company.logo_url, None);

    let calls = db.recorded();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].params, vec![SqlValue::from("new")]);
    assert!(calls[1].normalized_sql().starts_with(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url) VALUES ($1, $2, $3, $4, $5)"
    ));
    assert_eq!(
        calls[1].params,
        vec![
            SqlValue::from("new"),
            SqlValue::from("New"),
            SqlValue::from("New Description"),
            SqlValue::Int(1),
            SqlValue::Null,
        ]
    );
}

#[tokio::test]
async fn create_company_rejects_duplicate_handle() {
    let db = MockExecutor::new().with_rows(vec![json!({ "handle": "new" })]);

    let err = companies::create(&db, &new_company()).await.unwrap_err();
    assert!(matches!(err, DbError::AlreadyExists(_)));
    // Nothing was inserted.
    assert_eq!(db.call_count(), 1);
}

#[tokio::test]
async fn find_all_companies_without_filter() {
    let db = MockExecutor::new().with_rows(vec![c1_row()]);

    let found = companies::find_all(&db, &CompanyFilter::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].num_employees, Some(1));

    let call = &db.recorded()[0];
    assert!(!call.sql.contains("WHERE"));
    assert!(call.normalized_sql().ends_with("FROM companies ORDER BY name"));
    assert!(call.params.is_empty());
}

#[tokio::test]
async fn find_all_companies_with_filter() {
    let db = MockExecutor::new().with_no_rows();
    let filter = CompanyFilter {
        name_like: Some("c".into()),
        min_employees: Some(2),
        max_employees: None,
    };

    let found = companies::find_all(&db, &filter).await.unwrap();
    assert!(found.is_empty());

    let call = &db.recorded()[0];
    assert!(call
        .normalized_sql()
        .ends_with("FROM companies WHERE name ILIKE $1 AND num_employees >= $2 ORDER BY name"));
    assert_eq!(call.params, vec![SqlValue::from("%c%"), SqlValue::Int(2)]);
}

#[tokio::test]
async fn find_all_companies_rejects_inverted_range_before_querying() {
    let db = MockExecutor::new();
    let filter = CompanyFilter {
        min_employees: Some(50),
        max_employees: Some(10),
        ..Default::default()
    };

    let err = companies::find_all(&db, &filter).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidArgument(_)));
    assert_eq!(db.call_count(), 0);
}

#[tokio::test]
async fn get_company_groups_jobs() {
    let row = |id: i32, title: &str| {
        let mut r = c1_row();
        r["jobId"] = json!(id);
        r["jobTitle"] = json!(title);
        r["jobSalary"] = json!(10000);
        r["jobEquity"] = json!("0.005");
        r
    };
    let db = MockExecutor::new().with_rows(vec![row(1, "test1"), row(3, "test3")]);

    let detail = companies::get(&db, "c1").await.unwrap();
    assert_eq!(detail.company.name, "C1");
    assert_eq!(detail.jobs.len(), 2);
    assert_eq!(detail.jobs[0].id, 1);
    assert_eq!(detail.jobs[1].title, "test3");
    assert_eq!(detail.jobs[1].company_handle, "c1");
    assert_eq!(detail.jobs[0].equity, Some(Decimal::new(5, 3)));
}

#[tokio::test]
async fn get_company_without_jobs_has_empty_list() {
    let mut row = c1_row();
    row["jobId"] = json!(null);
    row["jobTitle"] = json!(null);
    row["jobSalary"] = json!(null);
    row["jobEquity"] = json!(null);
    let db = MockExecutor::new().with_rows(vec![row]);

    let detail = companies::get(&db, "c1").await.unwrap();
    assert!(detail.jobs.is_empty());
    assert_eq!(serde_json::to_value(&detail).unwrap()["jobs"], json!([]));
}

#[tokio::test]
async fn get_missing_company_is_not_found() {
    let db = MockExecutor::new();
    let err = companies::get(&db, "nope").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[tokio::test]
async fn update_company_binds_handle_after_set_params() {
    let db = MockExecutor::new().with_rows(vec![c1_row()]);
    let mut payload = UpdatePayload::new();
    payload.set("name", "New").set("numEmployees", 10).set("logoUrl", None::<String>);

    companies::update(&db, "c1", &payload).await.unwrap();

    let call = &db.recorded()[0];
    assert!(call.normalized_sql().starts_with(
        r#"UPDATE companies SET "name"=$1, "num_employees"=$2, "logo_url"=$3 WHERE handle = $4 RETURNING"#
    ));
    assert_eq!(
        call.params,
        vec![
            SqlValue::from("New"),
            SqlValue::Int(10),
            SqlValue::Null,
            SqlValue::from("c1"),
        ]
    );
}

#[tokio::test]
async fn update_missing_company_is_not_found() {
    let db = MockExecutor::new().with_no_rows();
    let payload: UpdatePayload = [("name", "x")].into_iter().collect();

    let err = companies::update(&db, "nope", &payload).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[tokio::test]
async fn update_company_with_no_data_never_queries() {
    let db = MockExecutor::new();
    let err = companies::update(&db, "c1", &UpdatePayload::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidArgument(_)));
    assert_eq!(db.call_count(), 0);
}

#[tokio::test]
async fn remove_company() {
    let db = MockExecutor::new()
        .with_rows(vec![json!({ "handle": "c1" })])
        .with_no_rows();

    companies::remove(&db, "c1").await.unwrap();
    let err = companies::remove(&db, "c1").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

// ============================================================
// jobs
// ============================================================

fn job_row(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "title": "test1",
        "salary": 10000,
        "equity": "0.005",
        "companyHandle": "c1",
    })
}

#[tokio::test]
async fn create_job() {
    let db = MockExecutor::new().with_rows(vec![json!({
        "id": 7,
        "title": "newJob",
        "salary": 10000,
        "equity": "0.123",
        "companyHandle": "c3",
    })]);
    let new_job = NewJob {
        title: "newJob".into(),
        salary: Some(10000),
        equity: Some(Decimal::new(123, 3)),
        company_handle: "c3".into(),
    };

    let job = jobs::create(&db, &new_job).await.unwrap();
    assert_eq!(job.id, 7);
    assert_eq!(job.equity, new_job.equity);

    let call = &db.recorded()[0];
    assert_eq!(
        call.params,
        vec![
            SqlValue::from("newJob"),
            SqlValue::Int(10000),
            SqlValue::Decimal(Decimal::new(123, 3)),
            SqlValue::from("c3"),
        ]
    );
}

#[tokio::test]
async fn find_all_jobs_with_every_filter() {
    let db = MockExecutor::new().with_rows(vec![job_row(1)]);
    let filter = JobFilter {
        title_like: Some("test".into()),
        min_salary: Some(5000),
        has_equity: Some(true),
    };

    let found = jobs::find_all(&db, &filter).await.unwrap();
    assert_eq!(found.len(), 1);

    let call = &db.recorded()[0];
    assert!(call.normalized_sql().ends_with(
        "FROM jobs WHERE title ILIKE $1 AND salary >= $2 AND equity >= 0 ORDER BY id"
    ));
    assert_eq!(call.params, vec![SqlValue::from("%test%"), SqlValue::Int(5000)]);
}

#[tokio::test]
async fn get_job() {
    let db = MockExecutor::new().with_rows(vec![job_row(1)]).with_no_rows();

    let job = jobs::get(&db, 1).await.unwrap();
    assert_eq!(job.company_handle, "c1");

    let err = jobs::get(&db, 0).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[tokio::test]
async fn update_job_with_null_fields() {
    let db = MockExecutor::new().with_rows(vec![json!({
        "id": 1,
        "title": "newJob",
        "salary": null,
        "equity": null,
        "companyHandle": "c1",
    })]);
    let mut payload = UpdatePayload::new();
    payload
        .set("title", "newJob")
        .set("salary", None::<i32>)
        .set("equity", None::<Decimal>)
        .set("companyHandle", "c1");

    let job = jobs::update(&db, 1, &payload).await.unwrap();
    assert_eq!(job.salary, None);
    assert_eq!(job.equity, None);

    let call = &db.recorded()[0];
    assert!(call.normalized_sql().starts_with(
        r#"UPDATE jobs SET "title"=$1, "salary"=$2, "equity"=$3, "company_handle"=$4 WHERE id = $5"#
    ));
    assert_eq!(call.params.last(), Some(&SqlValue::Int(1)));
}

#[tokio::test]
async fn update_and_remove_missing_job_are_not_found() {
    let db = MockExecutor::new();
    let payload: UpdatePayload = [("title", "x")].into_iter().collect();

    assert!(matches!(
        jobs::update(&db, 0, &payload).await,
        Err(DbError::NotFound(_))
    ));
    assert!(matches!(jobs::remove(&db, 0).await, Err(DbError::NotFound(_))));
}
