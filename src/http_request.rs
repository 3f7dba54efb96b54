use crate::config::Params;
use crate::params::RequestSpec;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        return match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request ready to be handed to an executor: encoded URL and optional
/// form body.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn from_spec(spec: &RequestSpec) -> HttpRequest {
        let body = construct_body(&spec.post);
        let method = if body.is_some() { HttpMethod::Post } else { HttpMethod::Get };
        return HttpRequest {
            method,
            url: construct_url(&spec.url, &spec.get),
            body,
        };
    }
}

/// `key1=value1&key2=value2` with both sides percent-encoded.
pub fn encode_params(params: &Params) -> String {
    return params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<String>>()
        .join("&");
}

pub fn construct_url(url: &str, get_params: &Params) -> String {
    if get_params.is_empty() {
        return url.to_string();
    }
    return format!("{}?{}", url, encode_params(get_params));
}

pub fn construct_body(post_params: &Params) -> Option<String> {
    if post_params.is_empty() {
        return None;
    }
    return Some(encode_params(post_params));
}
