use async_trait::async_trait;

use crate::error::OracleError;
use crate::event::ExtractedFields;

/// Remote classification and image-reading capability.
///
/// The engine never waits on this itself; callers resolve a category first
/// and hand the plain label to the event book. Implementations are free to
/// fail: [`super::policy`] turns every failure into a usable default.
#[async_trait]
pub trait CategoryOracle: Send + Sync {
    /// Pick one of `labels` for `title`. The reply is validated by the caller.
    async fn classify(&self, title: &str, labels: &[String]) -> Result<String, OracleError>;

    /// Read a title, date and time off a picture (poster, ticket, invite).
    async fn extract_from_image(
        &self,
        bytes: &[u8],
        mime: &str,
    ) -> Result<ExtractedFields, OracleError>;
}

/// Oracle used when the backend is switched off. Always fails, so the
/// failure defaults apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOracle;

#[async_trait]
impl CategoryOracle for NoOracle {
    async fn classify(&self, _title: &str, _labels: &[String]) -> Result<String, OracleError> {
        Err(OracleError::Disabled)
    }

    async fn extract_from_image(
        &self,
        _bytes: &[u8],
        _mime: &str,
    ) -> Result<ExtractedFields, OracleError> {
        Err(OracleError::Disabled)
    }
}
