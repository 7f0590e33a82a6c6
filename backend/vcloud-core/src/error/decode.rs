use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum DecodeError {
    #[error("XML Decode Error: {message} {location}")]
    Xml {
        message: String,
        location: ErrorLocation,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("Empty Body Error: {message} {location}")]
    EmptyBody {
        message: String,
        location: ErrorLocation,
    },
}

impl From<quick_xml::DeError> for DecodeError {
    #[track_caller]
    fn from(error: quick_xml::DeError) -> Self {
        DecodeError::Xml {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: error,
        }
    }
}
