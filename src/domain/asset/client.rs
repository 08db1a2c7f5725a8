//! Markets sub-client — paginated asset listing.

use super::convert::convert_page;
use crate::client::CoinscopeClient;
use crate::domain::asset::{self, Asset};
use crate::error::SdkError;

/// Sub-client for market listing operations.
pub struct Markets<'a> {
    pub(crate) client: &'a CoinscopeClient,
}

impl<'a> Markets<'a> {
    /// One page of assets ranked by descending market cap. Pages start at 1.
    pub async fn page(&self, page: u32, per_page: u32) -> Result<Vec<Asset>, SdkError> {
        let rows = self
            .client
            .http
            .get_markets(&self.client.currency, page, per_page)
            .await?;
        convert_page(rows).map_err(|e: asset::ValidationError| SdkError::Validation(e.to_string()))
    }

    /// First page at the client's configured page size.
    pub async fn top(&self) -> Result<Vec<Asset>, SdkError> {
        self.page(1, self.client.page_size).await
    }
}
