//! Records returned by the repositories and the payloads that create or
//! patch them.
//!
//! All of these use the external camelCase field names; the SQL in
//! [`crate::repository`] aliases storage columns back to them.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::sql::UpdatePayload;

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with every job it posted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    /// Empty, never null, when the company has no jobs.
    pub jobs: Vec<Job>,
}

/// Body of `POST /companies`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Body of `PATCH /companies/{handle}`. The handle itself cannot change.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyPatch {
    /// Fields present in the request, in declaration order. An explicit
    /// `null` is carried as [`SqlValue::Null`](crate::sql::SqlValue::Null).
    pub fn to_payload(&self) -> UpdatePayload {
        let mut payload = UpdatePayload::new();
        if let Some(name) = &self.name {
            payload.set("name", name.clone());
        }
        if let Some(description) = &self.description {
            payload.set("description", description.clone());
        }
        if let Some(num_employees) = self.num_employees {
            payload.set("numEmployees", num_employees);
        }
        if let Some(logo_url) = &self.logo_url {
            payload.set("logoUrl", logo_url.clone());
        }
        payload
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A job row. `equity` is a fraction in `[0, 1]`, serialized as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Body of `PATCH /jobs/{id}`. A job cannot move to another company.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<Decimal>>,
}

impl JobPatch {
    pub fn to_payload(&self) -> UpdatePayload {
        let mut payload = UpdatePayload::new();
        if let Some(title) = &self.title {
            payload.set("title", title.clone());
        }
        if let Some(salary) = self.salary {
            payload.set("salary", salary);
        }
        if let Some(equity) = self.equity {
            payload.set("equity", equity);
        }
        payload
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key
/// (`None`, via `#[serde(default)]`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
