use thiserror::Error;

use super::types::Region;

/// Errors that can occur while resolving a jurisdiction or computing VAT.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VatError {
    /// The jurisdiction name is not in the resolver's table.
    #[error("VAT cannot be calculated for unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    /// A request was missing a field or carried an unparseable amount.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Regions only supply defaults to their jurisdictions and have no
    /// standalone VAT computation.
    #[error("region {0} has no standalone VAT computation; name one of its jurisdictions")]
    RegionOnly(Region),

    /// A VAT figure fell outside the representable decimal range.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// A rule book built from configuration is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}
