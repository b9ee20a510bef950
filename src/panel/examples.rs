//! # Example Store
//!
//! Static example templates keyed by name, plus site substitution.
//! Templates are JSON text that may mention the placeholder domain
//! [`PLACEHOLDER_SITE`], which is swapped for the selected site.

/// Domain used by every template in place of a real site
pub const PLACEHOLDER_SITE: &str = "dummy.site";

/// Names of a request example and the response example shown next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelExamples {
    pub request: String,
    pub response: String,
}

impl PanelExamples {
    pub fn new(request: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            response: response.into(),
        }
    }

    /// Pair a request example with its `<stem>_response` counterpart.
    ///
    /// `query` pairs with `query_response`, `breakdown_query` with
    /// `breakdown_response`.
    pub fn for_request(request: &str) -> Self {
        let stem = request.strip_suffix("_query").unwrap_or(request);
        let response = if stem == request {
            format!("{request}_response")
        } else {
            format!("{stem}_response")
        };
        Self::new(request, response)
    }
}

const EXAMPLES: &[(&str, &str)] = &[
    (
        "query",
        r#"{
  "site_id": "dummy.site",
  "metrics": ["visitors", "pageviews"],
  "date_range": "7d"
}"#,
    ),
    (
        "query_response",
        r#"{
  "results": [{"metrics": [3721, 10845], "dimensions": []}],
  "meta": {},
  "query": {
    "site_id": "dummy.site",
    "metrics": ["visitors", "pageviews"],
    "date_range": ["2024-09-01T00:00:00+00:00", "2024-09-07T23:59:59+00:00"],
    "filters": [],
    "dimensions": [],
    "order_by": [["visitors", "desc"]],
    "include": {},
    "pagination": {"limit": 10000, "offset": 0}
  }
}"#,
    ),
    (
        "breakdown_query",
        r#"{
  "site_id": "dummy.site",
  "metrics": ["visitors", "bounce_rate"],
  "date_range": "30d",
  "dimensions": ["visit:source"],
  "filters": [["is_not", "visit:country_name", ["Estonia"]]]
}"#,
    ),
    (
        "breakdown_response",
        r#"{
  "results": [
    {"metrics": [1410, 41], "dimensions": ["Google"]},
    {"metrics": [820, 57], "dimensions": ["Direct / None"]},
    {"metrics": [212, 38], "dimensions": ["GitHub"]}
  ],
  "meta": {},
  "query": {
    "site_id": "dummy.site",
    "metrics": ["visitors", "bounce_rate"],
    "date_range": ["2024-08-09T00:00:00+00:00", "2024-09-07T23:59:59+00:00"],
    "filters": [["is_not", "visit:country_name", ["Estonia"]]],
    "dimensions": ["visit:source"],
    "order_by": [["visitors", "desc"]],
    "include": {},
    "pagination": {"limit": 10000, "offset": 0}
  }
}"#,
    ),
    (
        "timeseries_query",
        r#"{
  "site_id": "dummy.site",
  "metrics": ["visitors"],
  "date_range": "7d",
  "dimensions": ["time:day"]
}"#,
    ),
    (
        "timeseries_response",
        r#"{
  "results": [
    {"metrics": [512], "dimensions": ["2024-09-01"]},
    {"metrics": [498], "dimensions": ["2024-09-02"]},
    {"metrics": [631], "dimensions": ["2024-09-03"]}
  ],
  "meta": {},
  "query": {
    "site_id": "dummy.site",
    "metrics": ["visitors"],
    "date_range": ["2024-09-01T00:00:00+00:00", "2024-09-03T23:59:59+00:00"],
    "filters": [],
    "dimensions": ["time:day"],
    "order_by": [["time:day", "asc"]],
    "include": {},
    "pagination": {"limit": 10000, "offset": 0}
  }
}"#,
    ),
];

/// Raw template for `name`, if the store has one
pub fn template(name: &str) -> Option<&'static str> {
    EXAMPLES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, code)| *code)
}

/// All example names in store order
pub fn names() -> impl Iterator<Item = &'static str> {
    EXAMPLES.iter().map(|(key, _)| *key)
}

/// Names that can start a panel: requests whose paired response exists
pub fn request_names() -> impl Iterator<Item = &'static str> {
    names().filter(|name| is_request(name))
}

/// Whether `name` is a request example with a response to show next to it
pub fn is_request(name: &str) -> bool {
    template(name).is_some() && template(&PanelExamples::for_request(name).response).is_some()
}

/// Example code for `name` with the placeholder replaced by `site`.
///
/// Unknown names yield an empty string. An empty `site` leaves the template
/// untouched. Only the first placeholder occurrence is replaced.
pub fn get_code(name: &str, site: &str) -> String {
    substitute_site(template(name).unwrap_or(""), site)
}

/// Replace the first [`PLACEHOLDER_SITE`] in `template` with `site`
pub fn substitute_site(template: &str, site: &str) -> String {
    if site.is_empty() {
        return template.to_string();
    }
    template.replacen(PLACEHOLDER_SITE, site, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_site_should_replace_placeholder() {
        let code = substitute_site(r#"{"site": "dummy.site"}"#, "foo.com");
        assert_eq!(code, r#"{"site": "foo.com"}"#);
    }

    #[test]
    fn substitute_site_should_keep_template_for_empty_site() {
        let template = r#"{"site": "dummy.site"}"#;
        assert_eq!(substitute_site(template, ""), template);
    }

    #[test]
    fn substitute_site_should_only_replace_first_occurrence() {
        let code = substitute_site("dummy.site dummy.site", "foo.com");
        assert_eq!(code, "foo.com dummy.site");
    }

    #[test]
    fn get_code_should_return_empty_for_unknown_name() {
        assert_eq!(get_code("no_such_example", ""), "");
        assert_eq!(get_code("no_such_example", "foo.com"), "");
    }

    #[test]
    fn get_code_should_substitute_every_known_example() {
        for name in names() {
            let raw = template(name).unwrap();
            let code = get_code(name, "foo.com");
            if raw.contains(PLACEHOLDER_SITE) {
                assert!(code.contains("foo.com"), "{name} was not substituted");
            } else {
                assert_eq!(code, raw);
            }
            assert_eq!(get_code(name, ""), raw);
        }
    }

    #[test]
    fn all_examples_should_be_valid_json() {
        for name in names() {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(template(name).unwrap());
            assert!(parsed.is_ok(), "{name} is not valid JSON");
        }
    }

    #[test]
    fn request_names_should_exclude_responses_and_unknown_names() {
        let requests: Vec<&str> = request_names().collect();

        assert_eq!(requests, vec!["query", "breakdown_query", "timeseries_query"]);
        assert!(!is_request("query_response"));
        assert!(!is_request("no_such_example"));
    }

    #[test]
    fn panel_examples_should_pair_request_with_response() {
        assert_eq!(
            PanelExamples::for_request("query"),
            PanelExamples::new("query", "query_response")
        );
        assert_eq!(
            PanelExamples::for_request("breakdown_query"),
            PanelExamples::new("breakdown_query", "breakdown_response")
        );
    }
}
