use super::*;
use client_core::controller::{DELETE_FAILED_MESSAGE, FETCH_FAILED_MESSAGE};
use crossbeam_channel::bounded;

fn sample_user(id: i64, username: &str) -> User {
    User {
        id: UserId(id),
        username: username.to_string(),
        email: format!("{username}@x.com"),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

fn queued_requests(cmd_rx: &Receiver<BackendCommand>) -> Vec<ApiRequest> {
    cmd_rx
        .try_iter()
        .map(|cmd| match cmd {
            BackendCommand::Execute(request) => request,
        })
        .collect()
}

fn app_with_channels() -> (UserAdminApp, Receiver<BackendCommand>, Sender<UiEvent>) {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let app = UserAdminApp::new(cmd_tx, ui_rx);
    (app, cmd_rx, ui_tx)
}

#[test]
fn startup_queues_initial_list_request() {
    let (app, cmd_rx, _ui_tx) = app_with_channels();
    assert_eq!(queued_requests(&cmd_rx), vec![ApiRequest::List]);
    assert!(app.screen.is_loading());
}

#[test]
fn list_completion_fills_table_state() {
    let (mut app, cmd_rx, ui_tx) = app_with_channels();
    queued_requests(&cmd_rx);

    ui_tx
        .send(UiEvent::Completed(ApiCompletion::Listed(Ok(vec![
            sample_user(1, "a"),
        ]))))
        .expect("send");
    app.process_ui_events();

    assert_eq!(app.screen.users(), &[sample_user(1, "a")]);
    assert!(!app.screen.is_loading());
    assert!(queued_requests(&cmd_rx).is_empty());
}

#[test]
fn successful_save_queues_exactly_one_refresh() {
    let (mut app, cmd_rx, ui_tx) = app_with_channels();
    queued_requests(&cmd_rx);

    ui_tx
        .send(UiEvent::Completed(ApiCompletion::Saved(Ok(()))))
        .expect("send");
    app.process_ui_events();

    assert_eq!(queued_requests(&cmd_rx), vec![ApiRequest::List]);
    assert!(!app.screen.form().is_editing());
}

#[test]
fn worker_messages_update_status_line() {
    let (mut app, _cmd_rx, ui_tx) = app_with_channels();
    ui_tx
        .send(UiEvent::Info("Using API at http://127.0.0.1/api".to_string()))
        .expect("send");
    app.process_ui_events();
    assert_eq!(app.status, "Using API at http://127.0.0.1/api");

    ui_tx
        .send(UiEvent::WorkerFailed("backend worker startup failure".to_string()))
        .expect("send");
    app.process_ui_events();
    assert_eq!(app.status, "backend worker startup failure");
}

#[test]
fn disconnected_worker_does_not_leave_list_loading() {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (_ui_tx, ui_rx) = bounded::<UiEvent>(16);
    drop(cmd_rx);

    let app = UserAdminApp::new(cmd_tx, ui_rx);
    assert!(!app.screen.is_loading());
    assert_eq!(app.screen.error(), Some(FETCH_FAILED_MESSAGE));
    assert!(app.status.contains("disconnected"));
}

#[test]
fn declined_delete_prompt_sends_nothing() {
    let (mut app, cmd_rx, _ui_tx) = app_with_channels();
    queued_requests(&cmd_rx);

    app.pending_delete = Some(UserId(3));
    app.answer_delete_prompt(UserId(3), Confirmation::Declined);

    assert_eq!(app.pending_delete, None);
    assert!(queued_requests(&cmd_rx).is_empty());
}

#[test]
fn accepted_delete_prompt_queues_delete_then_refresh_on_success() {
    let (mut app, cmd_rx, ui_tx) = app_with_channels();
    queued_requests(&cmd_rx);

    app.pending_delete = Some(UserId(3));
    app.answer_delete_prompt(UserId(3), Confirmation::Accepted);
    assert_eq!(queued_requests(&cmd_rx), vec![ApiRequest::Delete(UserId(3))]);

    ui_tx
        .send(UiEvent::Completed(ApiCompletion::Deleted(Ok(()))))
        .expect("send");
    app.process_ui_events();
    assert_eq!(queued_requests(&cmd_rx), vec![ApiRequest::List]);
}

#[test]
fn failed_delete_shows_generic_error() {
    let (mut app, cmd_rx, ui_tx) = app_with_channels();
    queued_requests(&cmd_rx);

    ui_tx
        .send(UiEvent::Completed(ApiCompletion::Deleted(Err(
            RequestError::rejected(500, Some("boom".to_string())),
        ))))
        .expect("send");
    app.process_ui_events();

    assert_eq!(app.screen.error(), Some(DELETE_FAILED_MESSAGE));
    assert!(queued_requests(&cmd_rx).is_empty());
}
