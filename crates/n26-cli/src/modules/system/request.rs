use reqwest::Method;
use serde::Serialize;

use crate::modules::system::ApiError;

/// One call against the account API, fixed before it is handed to the client.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
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

    pub fn params(mut self, params: Vec<(String, String)>) -> Self {
        self.query.extend(params);
        self
    }

    /// Serializes the body up front so an unencodable value never reaches the wire.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(body).map_err(ApiError::Encoding)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        append_params(&mut url, &self.query);
        url
    }
}

pub(crate) fn build_params<const N: usize>(
    pairs: [Option<(String, String)>; N],
) -> Vec<(String, String)> {
    pairs.into_iter().flatten().collect()
}

pub(crate) fn opt_param(key: &str, value: Option<String>) -> Option<(String, String)> {
    value.map(|value| (key.to_string(), value))
}

pub(crate) fn append_params(url: &mut String, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }
    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<String>>()
        .join("&");
    url.push('?');
    url.push_str(&query);
}
