//! Resource identification from vCloud endpoint paths.

use std::sync::OnceLock;

use regex::Regex;

// Version segment, then resource type, then numeric id:
// `/api/v1.0/vApp/42` -> ("vApp", "42")
const RESOURCE_PATTERN: &str = r".*/v[^/]+/(?P<resource>[^/]+)/(?P<id>[0-9]+)";
const RESOURCE_CAPTURE_TYPE: &str = "resource";
const RESOURCE_CAPTURE_ID: &str = "id";

static RESOURCE_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_resource_regex() -> &'static Regex {
    RESOURCE_REGEX.get_or_init(|| Regex::new(RESOURCE_PATTERN).expect("valid regex pattern"))
}

/// Resource type and id addressed by `path`, if it follows the versioned layout.
pub fn resource_id(path: &str) -> Option<(&str, &str)> {
    let captures = get_resource_regex().captures(path)?;
    let resource = captures.name(RESOURCE_CAPTURE_TYPE)?.as_str();
    let id = captures.name(RESOURCE_CAPTURE_ID)?.as_str();
    Some((resource, id))
}

/// `"vApp 42 not found"`, or the raw path when it names no resource.
pub fn not_found_message(path: &str) -> String {
    match resource_id(path) {
        Some((resource, id)) => format!("{resource} {id} not found"),
        None => path.to_string(),
    }
}
