//! List-and-form state for the user management screen.
//!
//! The controller never performs I/O. Operations return the request the caller
//! has to issue, and request results come back through [`UserListController::apply`],
//! which may hand out a follow-up request (the refresh after a successful write).

use shared::{
    domain::UserId,
    protocol::{CreateUserRequest, UpdateUserRequest, User},
};
use tracing::{debug, warn};

use crate::error::RequestError;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch users";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save user";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete user";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub username: String,
    pub email: String,
}

/// In-progress create/edit input. Only the create variant carries a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Create { fields: UserFields, password: String },
    Edit { id: UserId, fields: UserFields },
}

impl Default for FormState {
    fn default() -> Self {
        Self::Create {
            fields: UserFields::default(),
            password: String::new(),
        }
    }
}

impl FormState {
    pub fn edit_id(&self) -> Option<UserId> {
        match self {
            Self::Create { .. } => None,
            Self::Edit { id, .. } => Some(*id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_id().is_some()
    }

    pub fn fields(&self) -> &UserFields {
        match self {
            Self::Create { fields, .. } | Self::Edit { fields, .. } => fields,
        }
    }

    pub fn fields_mut(&mut self) -> &mut UserFields {
        match self {
            Self::Create { fields, .. } | Self::Edit { fields, .. } => fields,
        }
    }

    pub fn password(&self) -> Option<&str> {
        match self {
            Self::Create { password, .. } => Some(password),
            Self::Edit { .. } => None,
        }
    }

    pub fn password_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Create { password, .. } => Some(password),
            Self::Edit { .. } => None,
        }
    }

    /// Required-field check applied by the input surface before it allows a submit.
    pub fn is_complete(&self) -> bool {
        let fields = self.fields();
        !fields.username.is_empty()
            && !fields.email.is_empty()
            && self.password().map_or(true, |password| !password.is_empty())
    }

    fn to_request(&self) -> ApiRequest {
        match self {
            Self::Create { fields, password } => ApiRequest::Create(CreateUserRequest {
                username: fields.username.clone(),
                email: fields.email.clone(),
                password: password.clone(),
            }),
            Self::Edit { id, fields } => ApiRequest::Update {
                id: *id,
                body: UpdateUserRequest {
                    username: fields.username.clone(),
                    email: fields.email.clone(),
                },
            },
        }
    }
}

/// Answer to the "Delete this user?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    List,
    Create(CreateUserRequest),
    Update { id: UserId, body: UpdateUserRequest },
    Delete(UserId),
}

impl ApiRequest {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list_users",
            Self::Create(_) => "create_user",
            Self::Update { .. } => "update_user",
            Self::Delete(_) => "delete_user",
        }
    }
}

/// Outcome of one [`ApiRequest`].
#[derive(Debug)]
pub enum ApiCompletion {
    Listed(Result<Vec<User>, RequestError>),
    Saved(Result<(), RequestError>),
    Deleted(Result<(), RequestError>),
}

impl ApiCompletion {
    /// Completion for a request that failed before any response arrived.
    pub fn failure(request: &ApiRequest, err: RequestError) -> Self {
        match request {
            ApiRequest::List => Self::Listed(Err(err)),
            ApiRequest::Create(_) | ApiRequest::Update { .. } => Self::Saved(Err(err)),
            ApiRequest::Delete(_) => Self::Deleted(Err(err)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserListController {
    users: Vec<User>,
    loading: bool,
    error: String,
    form: FormState,
}

impl UserListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state plus the list request every freshly shown screen issues.
    pub fn mount() -> (Self, ApiRequest) {
        let mut controller = Self::new();
        let request = controller.refresh();
        (controller, request)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        if self.error.is_empty() {
            None
        } else {
            Some(&self.error)
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn edit_id(&self) -> Option<UserId> {
        self.form.edit_id()
    }

    pub fn refresh(&mut self) -> ApiRequest {
        self.loading = true;
        self.error.clear();
        ApiRequest::List
    }

    pub fn submit(&mut self) -> ApiRequest {
        self.error.clear();
        let request = self.form.to_request();
        debug!(request = request.name(), "submitting user form");
        request
    }

    pub fn remove(&mut self, id: UserId, confirmation: Confirmation) -> Option<ApiRequest> {
        match confirmation {
            Confirmation::Declined => {
                debug!(user_id = id.0, "delete declined");
                None
            }
            Confirmation::Accepted => Some(ApiRequest::Delete(id)),
        }
    }

    pub fn begin_edit(&mut self, user: &User) {
        self.form = FormState::Edit {
            id: user.id,
            fields: UserFields {
                username: user.username.clone(),
                email: user.email.clone(),
            },
        };
    }

    pub fn cancel_edit(&mut self) {
        self.form = FormState::default();
    }

    /// Folds a request outcome into the state. Returns the refresh that must
    /// follow a successful write.
    pub fn apply(&mut self, completion: ApiCompletion) -> Option<ApiRequest> {
        match completion {
            ApiCompletion::Listed(result) => {
                match result {
                    Ok(users) => {
                        debug!(count = users.len(), "user list replaced");
                        self.users = users;
                    }
                    Err(err) => {
                        warn!(error = %err, "user list request failed");
                        self.error = failure_message(&err, FETCH_FAILED_MESSAGE);
                    }
                }
                self.loading = false;
                None
            }
            ApiCompletion::Saved(Ok(())) => {
                self.form = FormState::default();
                Some(self.refresh())
            }
            ApiCompletion::Saved(Err(err)) => {
                warn!(error = %err, "saving user failed");
                self.error = failure_message(&err, SAVE_FAILED_MESSAGE);
                None
            }
            ApiCompletion::Deleted(Ok(())) => Some(self.refresh()),
            ApiCompletion::Deleted(Err(err)) => {
                warn!(error = %err, "deleting user failed");
                self.error = DELETE_FAILED_MESSAGE.to_string();
                None
            }
        }
    }
}

fn failure_message(err: &RequestError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
