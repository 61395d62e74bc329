//! Host entry records
use std::fmt;

/// One host entry: a declared hostname, the address backing it, and the
/// resource that declared it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub domain: String,
    pub address: String,
    pub service: String,
}

impl RouteRecord {
    pub fn new(
        domain: impl Into<String>,
        address: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            address: address.into(),
            service: service.into(),
        }
    }
}

/// Tab-separated `ADDRESS DOMAIN # SERVICE`, before column alignment
impl fmt::Display for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t# {}", self.address, self.domain, self.service)
    }
}
