use crate::modules::spaces::{SpaceTransfer, Spaces};
use crate::modules::system::{ApiClient, ApiError, ApiRequest};

pub(crate) async fn list_spaces(api: &mut ApiClient) -> Result<Spaces, ApiError> {
    api.execute(&ApiRequest::get("/api/spaces")).await
}

pub(crate) async fn create_transfer(
    api: &mut ApiClient,
    payload: &SpaceTransfer,
) -> Result<(), ApiError> {
    let request = ApiRequest::post("/api/spaces/transaction").json(payload)?;
    api.execute_empty(&request).await
}
