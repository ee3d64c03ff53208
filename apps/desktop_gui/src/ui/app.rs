use std::time::Duration;

use chrono::Local;
use client_core::{
    ApiCompletion, ApiRequest, Confirmation, RequestError, UserListController, UserRow,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{domain::UserId, protocol::User};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const MAX_CONTENT_WIDTH: f32 = 896.0;
const TABLE_HEADERS: [&str; 5] = ["ID", "Username", "Email", "Created", "Actions"];
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);

enum TableAction {
    Refresh,
    Edit(User),
    Delete(UserId),
}

pub struct UserAdminApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    screen: UserListController,
    pending_delete: Option<UserId>,
    status: String,
}

impl UserAdminApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let (screen, request) = UserListController::mount();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            screen,
            pending_delete: None,
            status: "Starting backend worker...".to_string(),
        };
        app.issue(request);
        app
    }

    /// Hands `request` to the worker. A request that cannot be queued is fed
    /// back as a failed completion so the screen never waits on it.
    fn issue(&mut self, request: ApiRequest) {
        let mut next = Some(request);
        while let Some(request) = next.take() {
            let queued = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Execute(request.clone()),
                &mut self.status,
            );
            if !queued {
                let err = RequestError::Unsent(self.status.clone());
                next = self.screen.apply(ApiCompletion::failure(&request, err));
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::WorkerFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
                UiEvent::Completed(completion) => {
                    if let Some(follow_up) = self.screen.apply(completion) {
                        self.issue(follow_up);
                    }
                }
            }
        }
    }

    fn show_form_card(&mut self, ui: &mut egui::Ui) {
        let editing = self.screen.form().is_editing();
        let mut submit = false;
        let mut cancel = false;

        card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(if editing { "Edit User" } else { "Add User" })
                    .strong()
                    .size(18.0),
            );
            ui.add_space(6.0);

            let form = self.screen.form_mut();
            let fields = form.fields_mut();
            ui.add(
                egui::TextEdit::singleline(&mut fields.username)
                    .hint_text("Username")
                    .desired_width(f32::INFINITY),
            );
            ui.add(
                egui::TextEdit::singleline(&mut fields.email)
                    .hint_text("Email")
                    .desired_width(f32::INFINITY),
            );
            if let Some(password) = form.password_mut() {
                ui.add(
                    egui::TextEdit::singleline(password)
                        .password(true)
                        .hint_text("Password")
                        .desired_width(f32::INFINITY),
                );
            }

            let can_submit = self.screen.form().is_complete();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let label = if editing { "Update" } else { "Add" };
                let submit_btn = egui::Button::new(label).min_size(egui::vec2(96.0, 30.0));
                submit = ui.add_enabled(can_submit, submit_btn).clicked();
                if editing {
                    cancel = ui
                        .add(egui::Button::new("Cancel").min_size(egui::vec2(96.0, 30.0)))
                        .clicked();
                }
            });
        });

        if submit {
            let request = self.screen.submit();
            self.issue(request);
        } else if cancel {
            self.screen.cancel_edit();
        }
    }

    fn show_error_banner(&self, ui: &mut egui::Ui) {
        let Some(error) = self.screen.error() else {
            return;
        };
        egui::Frame::NONE
            .fill(ERROR_FILL)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(14, 10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.colored_label(ERROR_TEXT, error);
            });
        ui.add_space(12.0);
    }

    fn show_users_card(&mut self, ui: &mut egui::Ui) {
        let mut action = None;

        card_frame(ui).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Users").strong().size(18.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let loading = self.screen.is_loading();
                    let label = if loading { "Loading..." } else { "Refresh" };
                    if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                        action = Some(TableAction::Refresh);
                    }
                });
            });
            ui.add_space(6.0);

            if self.screen.users().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.weak("No users found");
                    ui.add_space(24.0);
                });
                return;
            }

            egui::ScrollArea::horizontal().show(ui, |ui| {
                egui::Grid::new("users_table")
                    .striped(true)
                    .num_columns(TABLE_HEADERS.len())
                    .spacing([18.0, 8.0])
                    .show(ui, |ui| {
                        for header in TABLE_HEADERS {
                            ui.strong(header);
                        }
                        ui.end_row();

                        for user in self.screen.users() {
                            let row = UserRow::new(user, &Local);
                            ui.label(row.id);
                            ui.label(row.username);
                            ui.label(row.email);
                            ui.label(row.created);
                            ui.horizontal(|ui| {
                                if ui.link("Edit").clicked() {
                                    action = Some(TableAction::Edit(user.clone()));
                                }
                                if ui
                                    .link(egui::RichText::new("Delete").color(ERROR_TEXT))
                                    .clicked()
                                {
                                    action = Some(TableAction::Delete(user.id));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        });

        match action {
            Some(TableAction::Refresh) => {
                let request = self.screen.refresh();
                self.issue(request);
            }
            Some(TableAction::Edit(user)) => self.screen.begin_edit(&user),
            Some(TableAction::Delete(id)) => self.pending_delete = Some(id),
            None => {}
        }
    }

    fn show_delete_prompt(&mut self, ctx: &egui::Context) {
        let Some(id) = self.pending_delete else {
            return;
        };
        let mut answer = None;
        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Delete this user?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        answer = Some(Confirmation::Declined);
                    }
                    if ui.button("OK").clicked() {
                        answer = Some(Confirmation::Accepted);
                    }
                });
            });
        if let Some(confirmation) = answer {
            self.answer_delete_prompt(id, confirmation);
        }
    }

    fn answer_delete_prompt(&mut self, id: UserId, confirmation: Confirmation) {
        self.pending_delete = None;
        if let Some(request) = self.screen.remove(id, confirmation) {
            self.issue(request);
        }
    }
}

fn card_frame(ui: &egui::Ui) -> egui::Frame {
    egui::Frame::group(ui.style())
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(18, 16))
}

impl eframe::App for UserAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.weak(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(MAX_CONTENT_WIDTH);
                ui.add_space(8.0);
                ui.heading("User Management");
                ui.add_space(16.0);
                self.show_form_card(ui);
                ui.add_space(16.0);
                self.show_error_banner(ui);
                self.show_users_card(ui);
            });
        });

        self.show_delete_prompt(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
