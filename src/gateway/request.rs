use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{GatewayError, GatewayResult};

/// A call as it will be put on the wire, before the base URL is applied
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Resource path, may carry a raw query such as `ids=1,2,3`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Status and body text of whatever the server answered
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Flatten a serializable filter into query pairs.
    /// Null fields are omitted, empty strings are sent as empty.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> GatewayResult<Self> {
        let value = serde_json::to_value(query)?;
        let fields = match value {
            Value::Object(fields) => fields,
            Value::Null => return Ok(self),
            other => {
                return Err(GatewayError::invalid_request(format!(
                    "query parameters must be an object, got {}",
                    other
                )))
            }
        };

        for (key, value) in fields {
            if let Some(rendered) = render_query_value(&key, value)? {
                self.query.push((key, rendered));
            }
        }
        Ok(self)
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> GatewayResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn set_header(&mut self, name: HeaderName, value: &str) -> GatewayResult<()> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::invalid_request(format!("invalid {} header: {}", name, e)))?;
        self.headers.insert(name, value);
        Ok(())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Absolute URL under `base_url`; a query already in the path is kept verbatim
    pub fn url(&self, base_url: &str) -> GatewayResult<Url> {
        let base = base_url.trim_end_matches('/');
        let joined = if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        };

        let mut url = Url::parse(&joined)?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

fn render_query_value(key: &str, value: Value) -> GatewayResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                if let Some(part) = render_query_value(key, item)? {
                    parts.push(part);
                }
            }
            Ok(Some(parts.join(",")))
        }
        Value::Object(_) => Err(GatewayError::invalid_request(format!(
            "query parameter '{}' cannot be a nested object",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_skips_nulls_keeps_empty_strings() {
        let request = ApiRequest::new(Method::GET, "/emps/search")
            .with_query(&json!({"page": 1, "pageSize": 10, "name": "", "gender": null}))
            .unwrap();

        assert!(request.query.contains(&("page".to_string(), "1".to_string())));
        assert!(request.query.contains(&("pageSize".to_string(), "10".to_string())));
        assert!(request.query.contains(&("name".to_string(), String::new())));
        assert!(!request.query.iter().any(|(k, _)| k == "gender"));
    }

    #[test]
    fn test_query_rejects_nested_objects() {
        let result = ApiRequest::new(Method::GET, "/logs").with_query(&json!({"filter": {"a": 1}}));
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));
    }

    #[test]
    fn test_url_keeps_raw_ids_query() {
        let request = ApiRequest::new(Method::DELETE, "/students?ids=1,2,3");
        let url = request.url("http://localhost:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/students?ids=1,2,3");
        assert_eq!(url.query(), Some("ids=1,2,3"));
    }

    #[test]
    fn test_url_appends_structured_query() {
        let request = ApiRequest::new(Method::GET, "logs")
            .with_query(&json!({"page": 3}))
            .unwrap();
        let url = request.url("http://localhost:8080/api/").unwrap();
        assert_eq!(url.path(), "/api/logs");
        assert_eq!(url.query(), Some("page=3"));
    }

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(401, "").is_success());
        assert!(!RawResponse::new(500, "").is_success());
    }
}
