//! Create, Read, Update, Delete operations
//!
//! Every call attaches the stored bearer token when one exists. A 401
//! response invalidates the token provider before the error is returned, so
//! callers only need to route the user back to sign-in.
//!
//! # Example
//!
//! ```ignore
//! use campus_lib::api::{Query, Resource};
//! use campus_lib::model::Record;
//!
//! let teachers = Resource::teachers();
//! let all = client.list(&teachers, &Query::new().filter("department", "CSE")).await?;
//!
//! let record = Record::new().set("name", "Grace").set("teacherId", 7);
//! client.create(&teachers, &record).await?;
//! client.update(&teachers, &7.into(), &record.without("teacherId")).await?;
//! client.delete(&teachers, &7.into()).await?;
//! ```

use reqwest::RequestBuilder;
use reqwest::Response;
use url::Url;

use super::Query;
use super::Resource;
use crate::CampusClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Record;
use crate::model::Value;

impl CampusClient {
    /// Lists the records of a collection matching the query.
    ///
    /// Accepts either a bare JSON array or an object wrapping the array in a
    /// `data` field.
    pub async fn list(&self, resource: &Resource, query: &Query) -> Result<Vec<Record>, Error> {
        let mut url = self.collection_url(resource)?;
        query.apply(&mut url);

        log::debug!("GET {} ({} filters)", url, query.params().len());
        let request = self.inner.http_client.get(url);
        let body = self.send(request).await?.text().await.map_err(ApiError::from)?;

        parse_records(&body).map_err(Error::from)
    }

    /// Creates a record.
    pub async fn create(&self, resource: &Resource, record: &Record) -> Result<(), Error> {
        let url = self.collection_url(resource)?;

        log::info!("POST {} ({} fields)", url, record.len());
        let request = self.inner.http_client.post(url).json(record);
        self.send(request).await?;
        Ok(())
    }

    /// Replaces the fields of the record addressed by `id`.
    pub async fn update(&self, resource: &Resource, id: &Value, record: &Record) -> Result<(), Error> {
        let url = resource.item_url(&self.collection_url(resource)?, id)?;

        log::info!("PUT {} ({} fields)", url, record.len());
        let request = self.inner.http_client.put(url).json(record);
        self.send(request).await?;
        Ok(())
    }

    /// Deletes the record addressed by `id`.
    pub async fn delete(&self, resource: &Resource, id: &Value) -> Result<(), Error> {
        let url = resource.item_url(&self.collection_url(resource)?, id)?;

        log::info!("DELETE {}", url);
        let request = self.inner.http_client.delete(url);
        self.send(request).await?;
        Ok(())
    }

    fn collection_url(&self, resource: &Resource) -> Result<Url, ApiError> {
        self.endpoint(resource.path())
    }

    /// Attaches auth and timeout, sends, and maps error statuses.
    async fn send(&self, mut request: RequestBuilder) -> Result<Response, Error> {
        if let Some(token) = self.inner.token_provider.token().await? {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_body(status.as_u16(), &body);

        if error.is_unauthorized() {
            log::warn!("API rejected credentials, clearing stored token");
            self.inner.token_provider.invalidate().await?;
        } else {
            log::warn!("API error: {}", error);
        }

        Err(error.into())
    }

    fn map_transport(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

/// Parses a list response body.
fn parse_records(body: &str) -> Result<Vec<Record>, ApiError> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ApiError::parse_with_body(e.to_string(), body))?;

    let items = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            _ => return Err(ApiError::parse_with_body("expected an array of records", body)),
        },
        _ => return Err(ApiError::parse_with_body("expected an array of records", body)),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::parse(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let records = parse_records(r#"[{"name":"Ada"},{"name":"Grace"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].value("name").as_str(), Some("Grace"));
    }

    #[test]
    fn test_parse_wrapped_array() {
        let records = parse_records(r#"{"data":[{"name":"Ada"}]}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_preserves_order() {
        let records = parse_records(r#"[{"n":3},{"n":1},{"n":2}]"#).unwrap();
        let order: Vec<i64> = records
            .iter()
            .filter_map(|r| match r.value("n") {
                Value::Int(n) => Some(*n),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_records(r#"{"error":"nope"}"#),
            Err(ApiError::Parse { .. })
        ));
        assert!(matches!(parse_records("not json"), Err(ApiError::Parse { .. })));
    }
}
