//! Parameterized SQL fragments.
//!
//! Statements are assembled textually from fragments; values never appear in
//! the SQL text and are instead carried alongside as positional parameters
//! bound to `$1, $2, …`.

use rust_decimal::Decimal;

use crate::DbError;

// ---------------------------------------------------------------------------
// SqlValue
// ---------------------------------------------------------------------------

/// A single positional parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Explicit SQL `NULL`.
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    /// Exact numeric, bound as `NUMERIC`.
    Decimal(Decimal),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// ClauseResult
// ---------------------------------------------------------------------------

/// A clause fragment and the parameters its placeholders refer to.
///
/// `params[i]` is bound to placeholder `$(i + 1)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseResult {
    pub fragment: String,
    pub params: Vec<SqlValue>,
}

impl ClauseResult {
    /// Index of the first placeholder a statement may append after this
    /// fragment.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }
}

// ---------------------------------------------------------------------------
// FieldMap
// ---------------------------------------------------------------------------

/// Static lookup table from external (camelCase) field names to storage
/// columns. Fields missing from the table use their external name verbatim.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap(&'static [(&'static str, &'static str)]);

impl FieldMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self(entries)
    }

    pub fn column<'a>(&self, field: &'a str) -> &'a str {
        self.0
            .iter()
            .find(|(external, _)| *external == field)
            .map_or(field, |&(_, column)| column)
    }
}

// ---------------------------------------------------------------------------
// UpdatePayload
// ---------------------------------------------------------------------------

/// Field/value pairs for a partial update, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    entries: Vec<(String, SqlValue)>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`. Setting a field twice replaces the earlier
    /// value without moving it.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for UpdatePayload
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Self::new();
        for (k, v) in iter {
            payload.set(k, v);
        }
        payload
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Quote a column name as a SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the body of a `SET` clause for a partial update.
///
/// ```text
/// {firstName: "edmond", age: 32}  =>  "first_name"=$1, "age"=$2
/// ```
///
/// The statement's own predicate placeholders start at
/// [`ClauseResult::next_placeholder`].
///
/// # Errors
/// [`DbError::InvalidArgument`] if `payload` is empty.
pub fn build_set_clause(
    payload: &UpdatePayload,
    field_map: &FieldMap,
) -> Result<ClauseResult, DbError> {
    if payload.is_empty() {
        return Err(DbError::InvalidArgument("no data".into()));
    }

    let mut cols = Vec::with_capacity(payload.len());
    let mut params = Vec::with_capacity(payload.len());
    for (idx, (field, value)) in payload.iter().enumerate() {
        cols.push(format!("{}=${}", quote_ident(field_map.column(field)), idx + 1));
        params.push(value.clone());
    }

    Ok(ClauseResult {
        fragment: cols.join(", "),
        params,
    })
}

/// Accumulates `AND`-joined predicates with sequentially numbered
/// placeholders.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    predicates: Vec<String>,
    params: Vec<SqlValue>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate consuming one placeholder. Every `{}` in `template`
    /// is replaced with that placeholder.
    pub fn and_param(&mut self, template: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.params.push(value.into());
        let placeholder = format!("${}", self.params.len());
        self.predicates.push(template.replace("{}", &placeholder));
        self
    }

    /// Add a fixed predicate that consumes no placeholder.
    pub fn and_raw(&mut self, predicate: &str) -> &mut Self {
        self.predicates.push(predicate.to_owned());
        self
    }

    /// `WHERE p1 AND p2 …`, or an empty fragment when nothing was added.
    pub fn build(self) -> ClauseResult {
        if self.predicates.is_empty() {
            return ClauseResult::default();
        }
        ClauseResult {
            fragment: format!("WHERE {}", self.predicates.join(" AND ")),
            params: self.params,
        }
    }
}

/// Wrap a pattern in `%…%` for a substring `ILIKE` match.
pub fn contains_pattern(value: &str) -> String {
    format!("%{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_FIELDS: FieldMap = FieldMap::new(&[
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ]);

    fn placeholder_count(fragment: &str) -> usize {
        fragment.matches('$').count()
    }

    #[test]
    fn set_clause_maps_fields_in_order() {
        let payload: UpdatePayload = [
            ("firstName", "edmond"),
            ("lastName", "soun"),
            ("isAdmin", "true"),
        ]
        .into_iter()
        .collect();

        let result = build_set_clause(&payload, &USER_FIELDS).unwrap();
        assert_eq!(
            result.fragment,
            r#""first_name"=$1, "last_name"=$2, "is_admin"=$3"#
        );
        assert_eq!(
            result.params,
            vec![
                SqlValue::from("edmond"),
                SqlValue::from("soun"),
                SqlValue::from("true"),
            ]
        );
        assert_eq!(result.next_placeholder(), 4);
    }

    #[test]
    fn set_clause_falls_back_to_field_name() {
        let mut payload = UpdatePayload::new();
        payload.set("age", 32).set("firstName", "Aliya");

        let result = build_set_clause(&payload, &USER_FIELDS).unwrap();
        assert_eq!(result.fragment, r#""age"=$1, "first_name"=$2"#);
        assert_eq!(result.params, vec![SqlValue::Int(32), SqlValue::from("Aliya")]);
    }

    #[test]
    fn set_clause_keeps_explicit_nulls() {
        let mut payload = UpdatePayload::new();
        payload.set("title", "newJob").set("salary", None::<i32>);

        let result = build_set_clause(&payload, &USER_FIELDS).unwrap();
        assert_eq!(result.fragment, r#""title"=$1, "salary"=$2"#);
        assert_eq!(result.params, vec![SqlValue::from("newJob"), SqlValue::Null]);
        assert_eq!(placeholder_count(&result.fragment), result.params.len());
    }

    #[test]
    fn set_clause_rejects_empty_payload() {
        let err = build_set_clause(&UpdatePayload::new(), &USER_FIELDS).unwrap_err();
        assert!(matches!(err, DbError::InvalidArgument(_)));

        let err = build_set_clause(&UpdatePayload::new(), &FieldMap::new(&[])).unwrap_err();
        assert!(matches!(err, DbError::InvalidArgument(_)));
    }

    #[test]
    fn set_clause_is_pure() {
        let payload: UpdatePayload = [("lastName", "soun")].into_iter().collect();
        let first = build_set_clause(&payload, &USER_FIELDS).unwrap();
        let second = build_set_clause(&payload, &USER_FIELDS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn resetting_a_field_keeps_its_position() {
        let mut payload = UpdatePayload::new();
        payload.set("a", 1).set("b", 2).set("a", 3);

        let result = build_set_clause(&payload, &FieldMap::new(&[])).unwrap();
        assert_eq!(result.fragment, r#""a"=$1, "b"=$2"#);
        assert_eq!(result.params, vec![SqlValue::Int(3), SqlValue::Int(2)]);
    }

    #[test]
    fn quoted_identifiers_escape_quotes() {
        assert_eq!(quote_ident("logo_url"), r#""logo_url""#);
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn where_builder_numbers_only_parameterized_predicates() {
        let mut builder = WhereBuilder::new();
        builder
            .and_param("title ILIKE {}", contains_pattern("eng"))
            .and_raw("equity >= 0")
            .and_param("salary >= {}", 50_000);

        let result = builder.build();
        assert_eq!(
            result.fragment,
            "WHERE title ILIKE $1 AND equity >= 0 AND salary >= $2"
        );
        assert_eq!(
            result.params,
            vec![SqlValue::from("%eng%"), SqlValue::Int(50_000)]
        );
    }

    #[test]
    fn empty_where_builder_yields_empty_fragment() {
        assert_eq!(WhereBuilder::new().build(), ClauseResult::default());
    }
}
