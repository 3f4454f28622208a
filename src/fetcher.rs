use tracing::{debug, info, warn};

use crate::client::ChallengeClient;
use crate::error::Result;
use crate::models::{FetchResult, ReleaseId, ReleaseInput};

/// Page size requested from the marketplace; the largest it serves.
pub const LISTINGS_PAGE_LIMIT: u32 = 250;

/// Listings page URL for a release, without the query string.
pub fn listings_url(base_url: &str, release_id: ReleaseId) -> String {
    format!("{}/sell/release/{}", base_url.trim_end_matches('/'), release_id)
}

/// Fetches the marketplace "sell" page for a release.
pub struct ListingsFetcher<C> {
    client: C,
    base_url: String,
}

impl<C: ChallengeClient> ListingsFetcher<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the listings page for `release`.
    ///
    /// Returns `Ok` for every received response: [`FetchResult::Ok`] with the
    /// body on 2xx, [`FetchResult::Error`] with the status otherwise. Invalid
    /// identifiers fail before any request is made; transport failures are
    /// returned as `Err`.
    pub async fn fetch(&self, release: impl Into<ReleaseInput>) -> Result<FetchResult> {
        let release_id = release.into().normalize()?;
        let url = listings_url(&self.base_url, release_id);
        debug!(%release_id, %url, "fetching listings");

        let query = [("limit", LISTINGS_PAGE_LIMIT.to_string())];
        let response = self.client.get(&url, &query).await?;

        if response.is_success() {
            info!(%release_id, bytes = response.body.len(), "listings fetched");
            Ok(FetchResult::Ok {
                body: response.body,
            })
        } else {
            warn!(%release_id, status = response.status, "listings request failed");
            Ok(FetchResult::Error {
                code: response.status,
            })
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
