//! `MockExecutor` — a test double for `Executor`.
//!
//! Records every statement it receives and replays row sets queued up by the
//! test, so repositories and handlers can be exercised without Postgres.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::executor::{Executor, Row};
use crate::sql::SqlValue;
use crate::DbError;

/// A statement seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl RecordedQuery {
    /// The SQL with runs of whitespace collapsed to single spaces.
    pub fn normalized_sql(&self) -> String {
        self.sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Default)]
pub struct MockExecutor {
    /// Row sets returned by successive calls; drained front to back.
    responses: Mutex<VecDeque<Vec<Row>>>,
    /// All statements seen by this executor (in call order).
    pub calls: Arc<Mutex<Vec<RecordedQuery>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the rows returned by the next unanswered call.
    ///
    /// Each value must be a JSON object. Once the queue is empty every call
    /// returns no rows.
    pub fn with_rows(self, rows: Vec<Value>) -> Self {
        let rows = rows
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => map,
                other => panic!("mock rows must be JSON objects, got {other}"),
            })
            .collect();
        self.responses.lock().unwrap().push_back(rows);
        self
    }

    /// Queue an empty row set.
    pub fn with_no_rows(self) -> Self {
        self.with_rows(Vec::new())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn recorded(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DbError> {
        self.calls.lock().unwrap().push(RecordedQuery {
            sql: sql.to_owned(),
            params: params.to_vec(),
        });
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }
}
