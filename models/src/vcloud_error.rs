//! The vCloud `<Error>` document.
//!
//! vCloud reports failures as an empty element whose attributes carry the
//! details:
//!
//! ```xml
//! <Error xmlns="http://www.vmware.com/vcloud/v1"
//!        minorErrorCode="BUSY_ENTITY"
//!        message="The entity vApp is busy completing an operation."
//!        majorErrorCode="400"/>
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VCloudError {
    #[serde(rename = "@message", default)]
    pub message: String,

    #[serde(
        rename = "@majorErrorCode",
        default,
        deserialize_with = "deserialize_major_code"
    )]
    pub major_error_code: Option<u16>,

    #[serde(
        rename = "@minorErrorCode",
        default,
        deserialize_with = "deserialize_minor_code"
    )]
    pub minor_error_code: Option<MinorCode>,

    #[serde(rename = "@vendorSpecificErrorCode", default)]
    pub vendor_specific_error_code: Option<String>,

    #[serde(rename = "@stackTrace", default)]
    pub stack_trace: Option<String>,
}

impl VCloudError {
    pub fn is_busy_entity(&self) -> bool {
        self.minor_error_code == Some(MinorCode::BusyEntity)
    }
}

impl fmt::Display for VCloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(major) = self.major_error_code {
            write!(f, " (major={major}")?;
            if let Some(minor) = &self.minor_error_code {
                write!(f, ", minor={minor}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Secondary classification of a vCloud error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinorCode {
    UnsupportedOperation,
    BusyEntity,
    DuplicateName,
    BadRequest,
    AccessToResourceIsForbidden,
    ResourceNotFound,
    Unrecognized,
}

impl MinorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MinorCode::UnsupportedOperation => "UNSUPPORTED_OPERATION",
            MinorCode::BusyEntity => "BUSY_ENTITY",
            MinorCode::DuplicateName => "DUPLICATE_NAME",
            MinorCode::BadRequest => "BAD_REQUEST",
            MinorCode::AccessToResourceIsForbidden => "ACCESS_TO_RESOURCE_IS_FORBIDDEN",
            MinorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            MinorCode::Unrecognized => "UNRECOGNIZED",
        }
    }
}

// Unknown codes map to Unrecognized; servers add codes between API versions.
impl From<&str> for MinorCode {
    fn from(value: &str) -> Self {
        match value.trim() {
            "UNSUPPORTED_OPERATION" => MinorCode::UnsupportedOperation,
            "BUSY_ENTITY" => MinorCode::BusyEntity,
            "DUPLICATE_NAME" => MinorCode::DuplicateName,
            "BAD_REQUEST" => MinorCode::BadRequest,
            "ACCESS_TO_RESOURCE_IS_FORBIDDEN" => MinorCode::AccessToResourceIsForbidden,
            "RESOURCE_NOT_FOUND" => MinorCode::ResourceNotFound,
            _ => MinorCode::Unrecognized,
        }
    }
}

impl fmt::Display for MinorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_minor_code<'de, D>(deserializer: D) -> Result<Option<MinorCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .map(MinorCode::from))
}

// A blank or non-numeric major code is dropped so the rest of the document survives.
fn deserialize_major_code<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|code| code.trim().parse().ok()))
}
