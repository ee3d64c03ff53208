pub mod api;
pub mod controller;
pub mod display;
pub mod error;
pub mod session;

pub use api::{HttpUserApi, UserApi};
pub use controller::{
    ApiCompletion, ApiRequest, Confirmation, FormState, UserFields, UserListController,
};
pub use display::{format_created_date, UserRow};
pub use error::RequestError;
pub use session::UserListSession;

/// Issues one request and wraps its outcome for [`UserListController::apply`].
pub async fn execute<A>(api: &A, request: ApiRequest) -> ApiCompletion
where
    A: UserApi + ?Sized,
{
    match request {
        ApiRequest::List => ApiCompletion::Listed(api.list_users().await),
        ApiRequest::Create(body) => ApiCompletion::Saved(api.create_user(&body).await),
        ApiRequest::Update { id, body } => ApiCompletion::Saved(api.update_user(id, &body).await),
        ApiRequest::Delete(id) => ApiCompletion::Deleted(api.delete_user(id).await),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
