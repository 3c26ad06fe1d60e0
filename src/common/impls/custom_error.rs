use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::ssl::enums::certificate_error::CertificateError;
use std::error::Error;
use std::fmt;
use std::fmt::Formatter;

impl CustomError {
    pub fn new(msg: &str) -> CustomError {
        CustomError { message: msg.to_string() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CustomError {}

impl From<ConfigurationError> for CustomError {
    fn from(error: ConfigurationError) -> Self {
        CustomError::new(&error.to_string())
    }
}

impl From<CertificateError> for CustomError {
    fn from(error: CertificateError) -> Self {
        CustomError::new(&error.to_string())
    }
}

impl From<std::io::Error> for CustomError {
    fn from(error: std::io::Error) -> Self {
        CustomError::new(&error.to_string())
    }
}
