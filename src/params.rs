use crate::config::{Params, RequestFile};
use crate::errors::BatcurlError;

/// Values given on the command line. They win over the request file.
#[derive(Debug, Default, Clone)]
pub struct CliRequest {
    pub url: Option<String>,
    pub get: Vec<String>,
    pub post: Vec<String>,
}

/// Command line values after the `key=value` tokens have been split.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliParams {
    pub url: Option<String>,
    pub get: Params,
    pub post: Params,
}

impl CliRequest {
    /// Splits every GET and POST token. Runs before the request file is read
    /// so a malformed token is reported ahead of any other problem.
    pub fn parse(&self) -> Result<CliParams, BatcurlError> {
        return Ok(CliParams {
            url: self.url.clone(),
            get: parse_params(&self.get)?,
            post: parse_params(&self.post)?,
        });
    }
}

/// Fully resolved request description, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: String,
    pub get: Params,
    pub post: Params,
}

/// Splits `key=value` tokens on the first `=`. An empty value is kept as an
/// empty string.
pub fn parse_params(tokens: &[String]) -> Result<Params, BatcurlError> {
    let mut params = Params::new();
    for token in tokens {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| BatcurlError::MalformedParam { token: token.clone() })?;
        params.insert(key.to_string(), value.to_string());
    }
    return Ok(params);
}

/// Returns `base` with every entry of `overlay` laid over it.
pub fn merge_params(base: &Params, overlay: &Params) -> Params {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    return merged;
}

fn non_empty(url: Option<&String>) -> Option<&String> {
    return url.filter(|u| !u.is_empty());
}

pub fn resolve_request(file: &RequestFile, cli: &CliParams) -> Result<RequestSpec, BatcurlError> {
    let url = non_empty(cli.url.as_ref())
        .or_else(|| non_empty(file.url.as_ref()))
        .ok_or(BatcurlError::MissingUrl)?
        .clone();
    let get = merge_params(&file.get, &cli.get);
    let post = merge_params(&file.post, &cli.post);
    tracing::debug!(%url, get = get.len(), post = post.len(), "request resolved");
    return Ok(RequestSpec { url, get, post });
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test_case("a=1", "a", "1" ; "simple")]
    #[test_case("a=", "a", "" ; "empty value")]
    #[test_case("a=b=c", "a", "b=c" ; "split on first equals")]
    #[test_case("=v", "", "v" ; "empty key")]
    fn parses_token(token: &str, key: &str, value: &str) {
        let parsed = parse_params(&tokens(&[token])).unwrap();
        assert_eq!(parsed, params(&[(key, value)]));
    }

    #[test]
    fn token_without_equals_is_rejected() {
        let err = parse_params(&tokens(&["a=1", "foo"])).unwrap_err();
        assert!(matches!(err, BatcurlError::MalformedParam { ref token } if token == "foo"));
    }

    #[test]
    fn later_token_wins() {
        let parsed = parse_params(&tokens(&["a=1", "a=2"])).unwrap();
        assert_eq!(parsed, params(&[("a", "2")]));
    }

    #[test]
    fn merge_is_per_key() {
        let file = params(&[("a", "1"), ("b", "2")]);
        let cli = parse_params(&tokens(&["b=9", "c=3"])).unwrap();
        let merged = merge_params(&file, &cli);
        assert_eq!(merged, params(&[("a", "1"), ("b", "9"), ("c", "3")]));
        assert_eq!(file, params(&[("a", "1"), ("b", "2")]));
    }

    #[test_case(Some("https://cli"), Some("https://file"), Some("https://cli") ; "cli wins")]
    #[test_case(None, Some("https://file"), Some("https://file") ; "file fallback")]
    #[test_case(Some(""), Some("https://file"), Some("https://file") ; "empty cli ignored")]
    #[test_case(None, None, None ; "missing")]
    #[test_case(None, Some(""), None ; "empty file url")]
    fn url_resolution(cli_url: Option<&str>, file_url: Option<&str>, expected: Option<&str>) {
        let file = RequestFile { url: file_url.map(String::from), ..Default::default() };
        let cli = CliParams { url: cli_url.map(String::from), ..Default::default() };
        match (resolve_request(&file, &cli), expected) {
            (Ok(spec), Some(url)) => assert_eq!(spec.url, url),
            (Err(BatcurlError::MissingUrl), None) => {}
            (other, _) => panic!("unexpected resolution {:?}", other),
        }
    }

    #[test]
    fn resolves_both_maps() {
        let file = RequestFile {
            url: Some("https://example.com".to_string()),
            get: params(&[("q", "file")]),
            post: params(&[("x", "1")]),
        };
        let cli = CliRequest {
            url: None,
            get: tokens(&["q=cli"]),
            post: tokens(&["y=2"]),
        };
        let spec = resolve_request(&file, &cli.parse().unwrap()).unwrap();
        assert_eq!(spec.get, params(&[("q", "cli")]));
        assert_eq!(spec.post, params(&[("x", "1"), ("y", "2")]));
    }

    #[test]
    fn malformed_post_aborts_parsing() {
        let cli = CliRequest {
            url: Some("https://example.com".to_string()),
            get: Vec::new(),
            post: tokens(&["nokey"]),
        };
        assert!(matches!(cli.parse(), Err(BatcurlError::MalformedParam { .. })));
    }

    #[test]
    fn malformed_token_reported_without_url() {
        let cli = CliRequest {
            url: None,
            get: tokens(&["foo"]),
            post: Vec::new(),
        };
        let err = cli.parse().unwrap_err();
        assert!(matches!(err, BatcurlError::MalformedParam { ref token } if token == "foo"));
    }
}
