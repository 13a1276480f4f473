//! Certificate sources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where server certificates come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CertificateProvider {
    #[default]
    #[serde(rename = "letsencrypt")]
    LetsEncrypt,
    #[serde(rename = "self-signed")]
    SelfSigned,
}

impl CertificateProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LetsEncrypt => "letsencrypt",
            Self::SelfSigned => "self-signed",
        }
    }
}

impl fmt::Display for CertificateProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
