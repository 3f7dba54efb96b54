use crate::errors::BatcurlError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

pub type Params = BTreeMap<String, String>;

/// Contents of a JSON request file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestFile {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_params")]
    pub get: Params,
    #[serde(default, deserialize_with = "deserialize_params")]
    pub post: Params,
}

// strings are taken verbatim, numbers and booleans by their JSON text
fn deserialize_params<'de, D>(deserializer: D) -> Result<Params, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = BTreeMap::deserialize(deserializer)?;
    let mut params = Params::new();
    for (key, value) in raw {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "parameter '{}' must be a string, number or boolean, got {}",
                    key, other
                )))
            }
        };
        params.insert(key, value);
    }
    return Ok(params);
}

pub fn read_request_file(path: &Path) -> Result<RequestFile, BatcurlError> {
    let file = File::open(path).map_err(|e| BatcurlError::ConfigRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let request_file: RequestFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| BatcurlError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    return Ok(request_file);
}

/// Loads the request file if one was given. A file that cannot be read is
/// reported to `out` and replaced by an empty configuration.
pub fn load_request_file<W: Write>(path: Option<&Path>, out: &mut W) -> RequestFile {
    let Some(path) = path else {
        return RequestFile::default();
    };
    return match read_request_file(path) {
        Ok(request_file) => {
            tracing::debug!(path = %path.display(), "request file loaded");
            request_file
        }
        Err(err) => {
            tracing::warn!(error = %err, "continuing with an empty configuration");
            if let Err(e) = writeln!(out, "ERROR: {}", err) {
                tracing::warn!(error = %e, "could not report the unreadable request file");
            }
            RequestFile::default()
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_case::test_case;

    fn temp_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("batcurl-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_all_fields() {
        let file: RequestFile = serde_json::from_str(
            r#"{"url":"https://example.com","get":{"q":"a b"},"post":{"x":"1"}}"#,
        )
        .unwrap();
        assert_eq!(file.url.as_deref(), Some("https://example.com"));
        assert_eq!(file.get.get("q").map(String::as_str), Some("a b"));
        assert_eq!(file.post.get("x").map(String::as_str), Some("1"));
    }

    #[test]
    fn all_fields_optional() {
        let file: RequestFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file, RequestFile::default());
    }

    #[test]
    fn unknown_keys_ignored() {
        let file: RequestFile = serde_json::from_str(r#"{"url":"u","headers":{"a":"b"}}"#).unwrap();
        assert_eq!(file.url.as_deref(), Some("u"));
    }

    #[test_case(r#"{"get":{"n":1}}"#, "1")]
    #[test_case(r#"{"get":{"n":2.5}}"#, "2.5")]
    #[test_case(r#"{"get":{"n":true}}"#, "true")]
    fn scalar_values_are_stringified(json: &str, expected: &str) {
        let file: RequestFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.get["n"], expected);
    }

    #[test_case(r#"{"get":{"n":null}}"#)]
    #[test_case(r#"{"post":{"n":[1]}}"#)]
    #[test_case(r#"{"post":{"n":{"a":"b"}}}"#)]
    fn structured_values_rejected(json: &str) {
        assert!(serde_json::from_str::<RequestFile>(json).is_err());
    }

    #[test]
    fn no_path_yields_empty_config_without_output() {
        let mut out = Vec::new();
        assert_eq!(load_request_file(None, &mut out), RequestFile::default());
        assert!(out.is_empty());
    }

    #[test]
    fn missing_file_is_reported_and_replaced() {
        let path = std::env::temp_dir().join(format!("batcurl-missing-{}.json", uuid::Uuid::new_v4()));
        let mut out = Vec::new();
        let file = load_request_file(Some(&path), &mut out);
        assert_eq!(file, RequestFile::default());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("ERROR: could not read JSON file"));
    }

    #[test]
    fn malformed_file_is_reported_and_replaced() {
        let path = temp_file("{ not json");
        let mut out = Vec::new();
        let file = load_request_file(Some(&path), &mut out);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(file, RequestFile::default());
        assert!(String::from_utf8(out).unwrap().starts_with("ERROR:"));
    }

    #[test]
    fn reads_file_from_disk() {
        let path = temp_file(r#"{"url":"https://example.com","post":{"k":"v"}}"#);
        let file = read_request_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(file.url.as_deref(), Some("https://example.com"));
        assert_eq!(file.post["k"], "v");
    }
}
