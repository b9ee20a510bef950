//! # Execution Result
//!
//! Normalized outcome of one query run. Every failure path produces the same
//! shape; fields the failure could not supply stay `None`.

use serde::Serialize;

/// Outcome of a single run, as displayed on the Response tab
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// HTTP status code, absent when the request never completed
    pub status: Option<u16>,
    /// Reason phrase for `status`
    pub status_text: Option<String>,
    /// Whether `status` is in the 2xx range
    pub ok: Option<bool>,
    /// Pretty-printed response body, empty when the body was not JSON
    pub data: String,
}

impl ExecutionResult {
    /// Result for a completed HTTP exchange
    pub fn from_status(status: u16, status_text: impl Into<String>, data: String) -> Self {
        Self {
            status: Some(status),
            status_text: Some(status_text.into()),
            ok: Some((200..300).contains(&status)),
            data,
        }
    }

    /// `Status: <status> - <statusText>`, with absent fields left blank
    pub fn status_line(&self) -> String {
        let status = self.status.map(|s| s.to_string()).unwrap_or_default();
        let text = self.status_text.as_deref().unwrap_or("");
        format!("Status: {status} - {text}")
    }

    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_should_derive_ok_flag() {
        assert_eq!(ExecutionResult::from_status(200, "OK", String::new()).ok, Some(true));
        assert_eq!(ExecutionResult::from_status(299, "", String::new()).ok, Some(true));
        assert_eq!(
            ExecutionResult::from_status(400, "Bad Request", String::new()).ok,
            Some(false)
        );
    }

    #[test]
    fn status_line_should_leave_missing_fields_blank() {
        assert_eq!(ExecutionResult::default().status_line(), "Status:  - ");
        assert_eq!(
            ExecutionResult::from_status(404, "Not Found", String::new()).status_line(),
            "Status: 404 - Not Found"
        );
    }

    #[test]
    fn should_serialize_with_camel_case_fields() {
        let result = ExecutionResult::from_status(200, "OK", "{}".into());
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"status":200,"statusText":"OK","ok":true,"data":"{}"}"#
        );
    }
}
