use shared::{domain::UserId, protocol::User};

use crate::{
    api::UserApi,
    controller::{ApiRequest, Confirmation, FormState, UserListController},
    execute,
};

/// Drives a [`UserListController`] against a [`UserApi`], running each
/// operation's request chain to completion before returning.
pub struct UserListSession<A: UserApi> {
    api: A,
    controller: UserListController,
}

impl<A: UserApi> UserListSession<A> {
    pub async fn mount(api: A) -> Self {
        let (controller, request) = UserListController::mount();
        let mut session = Self { api, controller };
        session.run(Some(request)).await;
        session
    }

    pub fn controller(&self) -> &UserListController {
        &self.controller
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        self.controller.form_mut()
    }

    pub async fn refresh(&mut self) {
        let request = self.controller.refresh();
        self.run(Some(request)).await;
    }

    pub async fn submit(&mut self) {
        let request = self.controller.submit();
        self.run(Some(request)).await;
    }

    pub async fn remove(&mut self, id: UserId, confirmation: Confirmation) {
        let request = self.controller.remove(id, confirmation);
        self.run(request).await;
    }

    pub fn begin_edit(&mut self, user: &User) {
        self.controller.begin_edit(user);
    }

    pub fn cancel_edit(&mut self) {
        self.controller.cancel_edit();
    }

    async fn run(&mut self, mut next: Option<ApiRequest>) {
        while let Some(request) = next.take() {
            let completion = execute(&self.api, request).await;
            next = self.controller.apply(completion);
        }
    }
}
