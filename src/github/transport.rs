// Transport abstraction over the GitHub REST API.
// Lets the project fetcher run against the real client or an in-process fake.

use serde_json::Value;

use crate::error::Result;

/// Issues GET requests against an API and returns the decoded JSON body.
///
/// Implementations must report non-success statuses, transport failures and
/// undecodable bodies as errors; callers do not inspect responses further.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// GET `endpoint` (a path such as `/repos/owner/name`) and decode the body.
    async fn get_json(&self, endpoint: &str) -> Result<Value>;
}
