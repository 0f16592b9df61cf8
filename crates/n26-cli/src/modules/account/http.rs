use crate::modules::account::{Account, Balance, PersonalInformation, Statistics};
use crate::modules::system::{ApiClient, ApiError, ApiRequest};

pub(crate) async fn fetch_personal_information(
    api: &mut ApiClient,
) -> Result<PersonalInformation, ApiError> {
    api.execute(&ApiRequest::get("/api/me")).await
}

pub(crate) async fn fetch_account(api: &mut ApiClient) -> Result<Account, ApiError> {
    api.execute(&ApiRequest::get("/api/accounts")).await
}

pub(crate) async fn fetch_balance(api: &mut ApiClient) -> Result<Balance, ApiError> {
    api.execute(&ApiRequest::get("/api/accounts")).await
}

pub(crate) async fn fetch_statistics(
    api: &mut ApiClient,
    from_millis: i64,
    to_millis: i64,
) -> Result<Statistics, ApiError> {
    let path = format!("/api/smrt/statistics/categories/{from_millis}/{to_millis}");
    api.execute(&ApiRequest::get(path)).await
}
