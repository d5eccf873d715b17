//! Whole-stack wizard runs: HTTP adapter against a mock server, local path
//! probe and file state store against temp directories.

use std::path::Path;

use mockito::{Mock, Server, ServerGuard};
use setup_wizard::bootstrap::wire_dependencies;
use setup_wizard::{WizardConfig, WizardController};
use sw_app::usecases::setup::ExitReason;
use sw_core::setup::{LibraryType, WizardStep};
use sw_infra::wizard_state::{DEFAULT_IN_PROGRESS_FILE, DEFAULT_WIZARD_STATE_FILE};
use tempfile::TempDir;

async fn status_mock(server: &mut ServerGuard, is_complete: bool, has_owner: bool) -> Mock {
    server
        .mock("GET", "/api/setup/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"isComplete":{is_complete},"hasOwner":{has_owner}}}"#
        ))
        .create_async()
        .await
}

fn config_for(server: &ServerGuard, state_dir: &Path, media_dir: &Path) -> WizardConfig {
    WizardConfig {
        api_base_url: server.url(),
        state_dir: state_dir.to_path_buf(),
        movie_path: media_dir.join("movies").to_string_lossy().into_owned(),
        tv_path: media_dir.join("tv").to_string_lossy().into_owned(),
        ..WizardConfig::default()
    }
}

fn controller_for(config: &WizardConfig) -> WizardController {
    wire_dependencies(config)
        .unwrap()
        .with_local_probe()
        .into_controller(config)
}

async fn create_account(controller: &WizardController) {
    controller.go_next().await.unwrap();
    controller.set_email("admin@example.com").await;
    controller.set_password("correct horse battery").await;
    controller.set_password_confirm("correct horse battery").await;
    let view = controller.submit_account().await.unwrap();
    assert_eq!(view.step, WizardStep::Library);
}

#[tokio::test]
async fn full_run_creates_missing_directory_and_finishes() {
    let mut server = Server::new_async().await;
    let state_dir = TempDir::new().unwrap();
    let media_dir = TempDir::new().unwrap();
    std::fs::create_dir(media_dir.path().join("movies")).unwrap();

    let status = status_mock(&mut server, false, false).await;
    let owner = server
        .mock("POST", "/api/setup/owner")
        .with_status(201)
        .with_body(r#"{"userId":"u-1"}"#)
        .create_async()
        .await;
    let libraries = server
        .mock("POST", "/api/libraries")
        .with_status(201)
        .with_body(r#"{"id":"lib"}"#)
        .expect(2)
        .create_async()
        .await;
    let privacy = server
        .mock("PUT", "/api/settings/privacy")
        .with_status(204)
        .create_async()
        .await;
    let complete = server
        .mock("POST", "/api/setup/complete")
        .with_status(204)
        .create_async()
        .await;

    let config = config_for(&server, state_dir.path(), media_dir.path());
    let controller = controller_for(&config);

    assert_eq!(controller.mount().await.step, WizardStep::Welcome);
    create_account(&controller).await;
    assert!(state_dir.path().join(DEFAULT_IN_PROGRESS_FILE).exists());

    let view = controller.view().await;
    assert!(view.validation.movie.exists);
    assert!(view.validation.tv.can_create_directory());

    let view = controller.create_directory(LibraryType::Tv).await.unwrap();
    assert!(view.validation.tv.just_created);
    assert!(media_dir.path().join("tv").is_dir());

    let view = controller.submit_libraries().await.unwrap();
    assert_eq!(view.step, WizardStep::Privacy);
    assert_eq!(view.created_libraries, vec![LibraryType::Movie, LibraryType::Tv]);

    assert_eq!(controller.submit_privacy().await.unwrap().step, WizardStep::Ready);

    let view = controller.finish().await.unwrap();
    assert_eq!(view.exit, Some(ExitReason::Finished));
    assert!(!state_dir.path().join(DEFAULT_WIZARD_STATE_FILE).exists());
    assert!(!state_dir.path().join(DEFAULT_IN_PROGRESS_FILE).exists());

    status.assert_async().await;
    owner.assert_async().await;
    libraries.assert_async().await;
    privacy.assert_async().await;
    complete.assert_async().await;
}

#[tokio::test]
async fn progress_survives_a_restart() {
    let state_dir = TempDir::new().unwrap();
    let media_dir = TempDir::new().unwrap();

    {
        let mut server = Server::new_async().await;
        status_mock(&mut server, false, false).await;
        server
            .mock("POST", "/api/setup/owner")
            .with_status(201)
            .with_body(r#"{"userId":"u-1"}"#)
            .create_async()
            .await;

        let config = config_for(&server, state_dir.path(), media_dir.path());
        let controller = controller_for(&config);
        controller.mount().await;
        create_account(&controller).await;
        controller.set_library_path(LibraryType::Tv, "").await;
        controller.unmount().await;
    }

    let mut server = Server::new_async().await;
    status_mock(&mut server, false, true).await;
    let config = config_for(&server, state_dir.path(), media_dir.path());
    let controller = controller_for(&config);

    let view = controller.mount().await;

    assert_eq!(view.step, WizardStep::Library);
    assert!(view.account_created);
    assert_eq!(view.account_email.as_deref(), Some("admin@example.com"));
    assert_eq!(view.libraries.tv.path, "");
}

#[tokio::test]
async fn stale_state_is_discarded_when_server_has_no_owner() {
    let state_dir = TempDir::new().unwrap();
    let media_dir = TempDir::new().unwrap();
    std::fs::write(
        state_dir.path().join(DEFAULT_WIZARD_STATE_FILE),
        r#"{"step":"ready","createdLibraries":["movie"],"accountEmail":"old@example.com"}"#,
    )
    .unwrap();
    std::fs::write(state_dir.path().join(DEFAULT_IN_PROGRESS_FILE), "1").unwrap();

    let mut server = Server::new_async().await;
    status_mock(&mut server, false, false).await;
    let config = config_for(&server, state_dir.path(), media_dir.path());
    let controller = controller_for(&config);

    let view = controller.mount().await;

    assert_eq!(view.step, WizardStep::Account);
    assert!(view.created_libraries.is_empty());
    assert!(!state_dir.path().join(DEFAULT_WIZARD_STATE_FILE).exists());
    assert!(!state_dir.path().join(DEFAULT_IN_PROGRESS_FILE).exists());
}

#[tokio::test]
async fn completed_server_exits_immediately() {
    let state_dir = TempDir::new().unwrap();
    let media_dir = TempDir::new().unwrap();
    let mut server = Server::new_async().await;
    status_mock(&mut server, true, true).await;
    let config = config_for(&server, state_dir.path(), media_dir.path());
    let controller = controller_for(&config);

    let view = controller.mount().await;

    assert_eq!(view.exit, Some(ExitReason::SetupAlreadyComplete));
}
