use crate::lulu_api::types::LuluError;
use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

pub const AUTHORIZATION: &str = "authorization";

/// Headers sent with every resource request unless overridden
pub fn default_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Cache-Control", "no-cache");
    headers.insert("Content-Type", "application/json");
    headers
}

/// Merge two maps: entries in `overrides` win, values are replaced whole
///
/// Neither input is modified. No deep merging takes place; a nested
/// structure in `overrides` replaces the one in `base` entirely.
pub fn merge_data<K, V>(base: &BTreeMap<K, V>, overrides: &BTreeMap<K, V>) -> BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Case-insensitive header map
///
/// Names are stored lowercased, so `Authorization` and `authorization`
/// address the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `self` as defaults, `overrides` on top
    pub fn merged_with(&self, overrides: &Headers) -> Headers {
        Headers(merge_data(&self.0, &overrides.0))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// A resource request as built by the endpoint wrappers
///
/// `path` is relative to the client's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub headers: Headers,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append query parameters from any serializable options struct
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, LuluError> {
        self.query.extend(to_query_pairs(params)?);
        Ok(self)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, LuluError> {
        let value = serde_json::to_value(body).map_err(|e| {
            LuluError::Configuration(format!("Failed to serialize request body: {}", e))
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Flatten a serializable struct into query string pairs
///
/// `None` fields are skipped; strings, numbers and booleans are rendered
/// as-is. Nested objects or arrays are not representable and are rejected.
pub fn to_query_pairs<T: Serialize + ?Sized>(params: &T) -> Result<Vec<(String, String)>, LuluError> {
    let value = serde_json::to_value(params).map_err(|e| {
        LuluError::Configuration(format!("Failed to serialize query parameters: {}", e))
    })?;

    let object = match value {
        serde_json::Value::Object(object) => object,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => {
            return Err(LuluError::Configuration(format!(
                "Query parameters must serialize to an object, got {}",
                other
            )))
        }
    };

    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        let rendered = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(LuluError::Configuration(format!(
                    "Query parameter '{}' must be a scalar, got {}",
                    key, other
                )))
            }
        };
        pairs.push((key, rendered));
    }
    Ok(pairs)
}
