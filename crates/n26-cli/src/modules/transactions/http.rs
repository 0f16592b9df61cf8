use crate::modules::system::{ApiClient, ApiError, ApiRequest};
use crate::modules::transactions::{ContactRequest, MoneyBeam, PastTransactionList};

pub(crate) async fn list_transactions(
    api: &mut ApiClient,
    params: Vec<(String, String)>,
) -> Result<PastTransactionList, ApiError> {
    let request = ApiRequest::get("/api/smrt/transactions").params(params);
    api.execute(&request).await
}

/// Contacts the upstream knows for `recipient`; empty when it is not a customer.
pub(crate) async fn check_contact(
    api: &mut ApiClient,
    recipient: &str,
) -> Result<Vec<ContactRequest>, ApiError> {
    let request = ApiRequest::post("/api/contacts").json(&[recipient])?;
    api.execute(&request).await
}

pub(crate) async fn create_money_beam(
    api: &mut ApiClient,
    payload: &MoneyBeam,
) -> Result<(), ApiError> {
    let request = ApiRequest::post("/api/transactions").json(payload)?;
    api.execute_empty(&request).await
}
