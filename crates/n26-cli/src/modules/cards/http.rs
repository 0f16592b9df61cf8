use crate::modules::cards::{CardList, LimitList};
use crate::modules::system::{ApiClient, ApiError, ApiRequest};

pub(crate) async fn list_cards(api: &mut ApiClient) -> Result<CardList, ApiError> {
    api.execute(&ApiRequest::get("/api/v2/cards")).await
}

pub(crate) async fn list_limits(api: &mut ApiClient) -> Result<LimitList, ApiError> {
    api.execute(&ApiRequest::get("/api/settings/account/limits"))
        .await
}
