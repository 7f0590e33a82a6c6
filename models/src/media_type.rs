//! vCloud media types.

use const_format::concatcp;

const VCLOUD_MEDIA_TYPE_PREFIX: &str = "application/vnd.vmware.vcloud.";

/// Content type of a vCloud `<Error>` document.
pub const ERROR_XML: &str = concatcp!(VCLOUD_MEDIA_TYPE_PREFIX, "error+xml");

/// Strip parameters (`; charset=...`) and surrounding whitespace from a
/// declared content type.
pub fn essence(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(essence, _)| essence)
        .trim()
}

/// Compare a declared content type against a media type, ignoring
/// parameters and ASCII case.
pub fn matches(content_type: &str, media_type: &str) -> bool {
    essence(content_type).eq_ignore_ascii_case(media_type)
}
