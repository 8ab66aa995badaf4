//! Request extractors for the calendar endpoints.
//!
//! Mutations accept either a JSON object or a form-encoded body and are
//! flattened into [`Fields`], a plain string map. Range queries read their
//! parameters from the query string via [`RangeQuery`]. Both expose typed
//! accessors that produce the exact client-facing error messages, and both
//! reject with [`ApiError`] so every failure carries the JSON error body.
//!
//! A key repeated in a form body or query string keeps its first value.

use std::collections::BTreeMap;
use std::num::IntErrorKind;

use axum::Json;
use axum::extract::{Form, FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::http::{Uri, header};
use calendar_core::parse_day;
use calendar_types::UserId;
use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ApiError;

/// Flattened fields of a mutation request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    /// A field value, treating empty strings as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// The event id, or the empty string when absent.
    pub fn id(&self) -> &str {
        self.get("id").unwrap_or_default()
    }

    /// The owning user, required and strictly positive.
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        let raw = self
            .get("user_id")
            .ok_or_else(|| ApiError::bad_request("missing user_id"))?;
        parse_user_id(raw)
    }

    /// The user id for deletes.
    ///
    /// Absent or non-numeric values become `0`, which the store treats as an
    /// unscoped delete. Numbers outside the `i64` range saturate instead, so
    /// an oversized positive id stays a scoped delete.
    pub fn user_id_or_unscoped(&self) -> UserId {
        let Some(raw) = self.get("user_id") else {
            return 0;
        };
        match raw.parse::<UserId>() {
            Ok(id) => id,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => UserId::MAX,
                IntErrorKind::NegOverflow => UserId::MIN,
                _ => 0,
            },
        }
    }

    /// The event date, required, as `YYYY-MM-DD`.
    pub fn date(&self) -> Result<NaiveDate, ApiError> {
        let raw = self
            .get("date")
            .ok_or_else(|| ApiError::bad_request("missing date"))?;
        Ok(parse_day(raw)?)
    }

    /// The event description, required and non-empty.
    pub fn text(&self) -> Result<&str, ApiError> {
        self.get("event")
            .ok_or_else(|| ApiError::bad_request("missing event"))
    }
}

impl<S> FromRequest<S> for Fields
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        if content_type.starts_with("application/json") {
            let Json(raw) = Json::<BTreeMap<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected JSON body");
                    ApiError::MalformedBody
                })?;
            return flatten_json(raw).map(Self);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected form body");
                    ApiError::MalformedBody
                })?;
            return Ok(Self(first_values(pairs)));
        }

        // No recognised body: fall back to the query string, so a bare
        // POST reports the first missing field rather than a decode error.
        query_pairs(req.uri()).map(Self)
    }
}

/// Decode a query string into a field map.
fn query_pairs(uri: &Uri) -> Result<BTreeMap<String, String>, ApiError> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).map_err(|e| {
        tracing::debug!(error = %e, "rejected query string");
        ApiError::bad_request("malformed query string")
    })?;
    Ok(first_values(pairs))
}

fn first_values(pairs: Vec<(String, String)>) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(value);
    }
    fields
}

/// Keep string and numeric scalars; `null` counts as absent. Nested values
/// cannot be a field and make the body malformed.
fn flatten_json(raw: BTreeMap<String, Value>) -> Result<BTreeMap<String, String>, ApiError> {
    let mut fields = BTreeMap::new();
    for (key, value) in raw {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
                return Err(ApiError::MalformedBody);
            }
        };
        fields.insert(key, text);
    }
    Ok(fields)
}

/// Query parameters shared by the range endpoints.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RangeQuery {
    /// The user whose events to list.
    pub user_id: Option<String>,
    /// Any day inside the requested range, as `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl RangeQuery {
    /// Validate and convert into `(user_id, day)`.
    pub fn parse(&self) -> Result<(UserId, NaiveDate), ApiError> {
        let user_id = parse_user_id(self.user_id.as_deref().unwrap_or_default())?;
        let day = parse_day(self.date.as_deref().unwrap_or_default())?;
        Ok((user_id, day))
    }
}

impl<S> FromRequestParts<S> for RangeQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut fields = query_pairs(&parts.uri)?;
        Ok(Self {
            user_id: fields.remove("user_id"),
            date: fields.remove("date"),
        })
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    match raw.parse::<UserId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request("invalid user_id")),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use calendar_core::CalendarError;

    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        Fields(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn user_id_messages() {
        let err = fields(&[]).user_id().unwrap_err();
        assert_eq!(err.to_string(), "missing user_id");

        for bad in ["abc", "0", "-4", "1.5"] {
            let err = fields(&[("user_id", bad)]).user_id().unwrap_err();
            assert_eq!(err.to_string(), "invalid user_id", "{bad}");
        }

        assert_eq!(fields(&[("user_id", "12")]).user_id().unwrap(), 12);
    }

    #[test]
    fn date_messages() {
        assert_eq!(fields(&[]).date().unwrap_err().to_string(), "missing date");
        let err = fields(&[("date", "12/25/2023")]).date().unwrap_err();
        assert!(matches!(err, ApiError::Calendar(CalendarError::InvalidDate)));
        assert_eq!(err.to_string(), "invalid date");
    }

    #[test]
    fn empty_text_is_missing() {
        let err = fields(&[("event", "")]).text().unwrap_err();
        assert_eq!(err.to_string(), "missing event");
        assert_eq!(fields(&[("event", "Lunch")]).text().unwrap(), "Lunch");
    }

    #[test]
    fn delete_user_falls_back_to_unscoped() {
        assert_eq!(fields(&[]).user_id_or_unscoped(), 0);
        assert_eq!(fields(&[("user_id", "x")]).user_id_or_unscoped(), 0);
        assert_eq!(fields(&[("user_id", "5")]).user_id_or_unscoped(), 5);
        assert_eq!(fields(&[("user_id", "-2")]).user_id_or_unscoped(), -2);
    }

    #[test]
    fn delete_user_saturates_on_overflow() {
        let huge = fields(&[("user_id", "99999999999999999999")]);
        assert_eq!(huge.user_id_or_unscoped(), i64::MAX);
        let tiny = fields(&[("user_id", "-99999999999999999999")]);
        assert_eq!(tiny.user_id_or_unscoped(), i64::MIN);
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let pairs = vec![
            (String::from("user_id"), String::from("1")),
            (String::from("date"), String::from("2024-01-01")),
            (String::from("user_id"), String::from("2")),
        ];
        let map = first_values(pairs);
        assert_eq!(map.get("user_id").map(String::as_str), Some("1"));
        assert_eq!(map.len(), 2);
    }

    #[tokio::test]
    async fn range_query_reads_first_of_repeated_keys() {
        let uri = "/events_for_day?user_id=1&user_id=2&date=2024-01-01";
        let request = axum::http::Request::get(uri).body(()).unwrap();
        let (mut parts, ()) = request.into_parts();
        let query = RangeQuery::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(query.user_id.as_deref(), Some("1"));
        assert_eq!(query.date.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn json_scalars_are_flattened() {
        let raw: BTreeMap<String, Value> = serde_json::from_str(
            r#"{"user_id": 3, "date": "2023-12-25", "event": "x", "id": null}"#,
        )
        .unwrap();
        let flat = flatten_json(raw).unwrap();
        assert_eq!(flat.get("user_id").map(String::as_str), Some("3"));
        assert!(!flat.contains_key("id"));
    }

    #[test]
    fn nested_json_is_malformed() {
        let raw: BTreeMap<String, Value> =
            serde_json::from_str(r#"{"user_id": [1]}"#).unwrap();
        assert!(matches!(flatten_json(raw), Err(ApiError::MalformedBody)));
    }

    #[test]
    fn range_query_validation() {
        let query = RangeQuery {
            user_id: Some(String::from("0")),
            date: Some(String::from("2023-12-25")),
        };
        assert_eq!(query.parse().unwrap_err().to_string(), "invalid user_id");

        let query = RangeQuery {
            user_id: Some(String::from("1")),
            date: None,
        };
        assert_eq!(query.parse().unwrap_err().to_string(), "invalid date");

        let query = RangeQuery {
            user_id: Some(String::from("1")),
            date: Some(String::from("2023-12-25")),
        };
        let (user, day) = query.parse().unwrap();
        assert_eq!(user, 1);
        assert_eq!(day, NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
    }
}
