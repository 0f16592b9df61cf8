use tracing::warn;

use crate::modules::shared::{Category, Metadata};
use crate::modules::system::{ApiClient, ApiError, ApiRequest};

/// Category names for printers. An upstream or decode failure leaves raw ids
/// in the output; authentication and transport failures still abort.
pub(crate) async fn fetch_metadata(api: &mut ApiClient) -> anyhow::Result<Metadata> {
    let request = ApiRequest::get("/api/smrt/categories");
    match api.execute::<Vec<Category>>(&request).await {
        Ok(categories) => Ok(Metadata::from_categories(categories)),
        Err(err @ (ApiError::Upstream(_) | ApiError::UnknownUpstream | ApiError::Decoding(_))) => {
            warn!("could not load categories: {err}");
            Ok(Metadata::default())
        }
        Err(err) => Err(err.into()),
    }
}
