mod common;

use std::sync::Arc;

use common::*;
use route_console::controllers::console_session::ConsoleSession;
use route_console::controllers::mutation_flow::{FlowPhase, Navigation};
use route_console::controllers::route_list_controller::{ListState, RouteListController};
use route_console::models::route::RouteForm;
use route_console::models::session::Role;
use route_console::utils::errors::ConsoleError;

fn console(service: &Arc<FakeRouteService>, id: &str, role: Role) -> ConsoleSession {
    ConsoleSession::new(service.clone(), session(id, role))
}

fn new_route_form() -> RouteForm {
    RouteForm {
        state: Some("Pendiente".to_string()),
        avg_traffic: Some("Moderado".to_string()),
        priority: Some("Media".to_string()),
        distance_total_km: Some(22.5),
        avg_time_minutes: Some(55),
        vehicle_plate: Some("QWE123".to_string()),
        driver_id: Some("333".to_string()),
    }
}

#[tokio::test]
async fn test_manager_loads_all_routes_with_counts() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);

    console.list.load().await.unwrap();

    assert_eq!(console.list.routes().len(), 4);
    assert_eq!(console.list.active_count(), 2);
    assert_eq!(console.list.completed_count(), 1);

    let route = console.list.find("RUTA_007").unwrap();
    assert_eq!(route.state, "En Proceso");
    assert_eq!(route.avg_traffic, "Muy Alto");
    assert_eq!(route.priority, "Alta");
    assert_eq!(service.calls(), vec!["get_states", "get_all"]);
}

#[tokio::test]
async fn test_driver_sees_only_own_routes() {
    let service = FakeRouteService::new(sample_routes());
    let mut list = RouteListController::new(service.clone(), session(DRIVER_ID, Role::Driver));

    list.load().await.unwrap();

    let ids: Vec<&str> = list.routes().iter().map(|route| route.public_id.as_str()).collect();
    assert_eq!(ids, vec!["RUTA_001", "RUTA_007"]);
    assert!(list.routes().iter().all(|route| route.is_assigned_to(DRIVER_ID)));
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let service = FakeRouteService::new(sample_routes());
    let mut list = RouteListController::new(service.clone(), session(MANAGER_ID, Role::Administrator));

    list.load().await.unwrap();
    let first = list.routes().to_vec();
    list.load().await.unwrap();

    assert_eq!(list.routes(), first.as_slice());
}

#[tokio::test]
async fn test_failed_load_discards_previous_list() {
    let service = FakeRouteService::new(sample_routes());
    let mut list = RouteListController::new(service.clone(), session(MANAGER_ID, Role::Manager));
    list.load().await.unwrap();

    service.fail("get_all", ConsoleError::Network("connection refused".to_string()));
    let result = list.load().await;

    assert!(matches!(result, Err(ConsoleError::Network(_))));
    assert!(matches!(list.state(), ListState::Failed(ConsoleError::Network(_))));
    assert!(list.routes().is_empty());
    assert!(list.translator().is_ok());
}

#[tokio::test]
async fn test_failed_state_catalog_leaves_translator_unbuilt() {
    let service = FakeRouteService::new(sample_routes());
    service.fail("get_states", ConsoleError::Server { status: 500, message: String::new() });
    let mut list = RouteListController::new(service.clone(), session(MANAGER_ID, Role::Manager));

    assert!(list.load().await.is_err());
    assert_eq!(list.translator().err(), Some(ConsoleError::TranslatorNotReady));
    assert_eq!(service.count("get_all"), 0);
}

#[tokio::test]
async fn test_session_end_during_load_discards_result() {
    let service = FakeRouteService::new(sample_routes());
    let context = session(MANAGER_ID, Role::Manager);
    let mut list = RouteListController::new(service.clone(), context.clone());
    service.end_session_during_get_all(context);

    assert_eq!(list.load().await, Err(ConsoleError::SessionEnded));
    assert!(list.routes().is_empty());
    assert!(!matches!(list.state(), ListState::Loaded(_)));
}

#[tokio::test]
async fn test_update_search_navigates_without_network() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();
    let calls_before = service.calls().len();

    let navigation = console.update.search(&console.list, " RUTA_002 ").unwrap();
    assert_eq!(
        navigation,
        Navigation::EditRoute {
            public_id: "RUTA_002".to_string()
        }
    );
    assert_eq!(navigation.path(), "/edit-route/RUTA_002");

    let missing = console.update.search(&console.list, "RUTA_999");
    assert!(matches!(missing, Err(ConsoleError::NotFound(_))));
    assert_eq!(console.update.phase(), FlowPhase::Idle);
    assert_eq!(service.calls().len(), calls_before);
}

#[tokio::test]
async fn test_update_submit_reloads_list() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    let mut form = RouteForm::from_route(console.list.find("RUTA_003").unwrap());
    form.state = Some("Completada".to_string());

    let receipt = console.update.submit(&mut console.list, "RUTA_3", form).await.unwrap();

    assert_eq!(receipt.public_id, "RUTA_003");
    assert!(receipt.reload_warning.is_none());
    assert_eq!(console.update.phase(), FlowPhase::Done);
    assert_eq!(service.count("update:3"), 1);
    assert_eq!(console.list.find("RUTA_003").unwrap().state, "Completada");
    assert_eq!(console.list.completed_count(), 2);
}

#[tokio::test]
async fn test_missing_priority_makes_no_network_call() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    let mut form = new_route_form();
    form.priority = None;
    let result = console.create.submit(&mut console.list, form).await;

    match result {
        Err(ConsoleError::Validation { field, .. }) => assert_eq!(field, "priority"),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(console.create.phase(), FlowPhase::Idle);
    assert_eq!(service.count("create"), 0);
}

#[tokio::test]
async fn test_create_then_retry_after_failure() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Administrator);
    console.list.load().await.unwrap();

    service.fail("create", ConsoleError::Network("timeout".to_string()));
    let failed = console.create.submit(&mut console.list, new_route_form()).await;
    assert!(matches!(failed, Err(ConsoleError::Network(_))));
    assert_eq!(console.create.phase(), FlowPhase::Failed);
    assert!(console.create.staged_form().is_some());

    service.recover("create");
    let receipt = console.create.retry(&mut console.list).await.unwrap();

    assert_eq!(receipt.public_id, "RUTA_008");
    assert_eq!(receipt.navigation, Navigation::RouteList);
    assert_eq!(console.create.phase(), FlowPhase::Done);
    assert_eq!(console.list.routes().len(), 5);
    assert_eq!(console.list.find("RUTA_008").unwrap().avg_traffic, "Moderado");
}

#[tokio::test]
async fn test_delete_search_not_found_makes_no_call() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    let result = console.delete.search(&console.list, "RUTA_999");

    assert!(matches!(result, Err(ConsoleError::NotFound(_))));
    assert_eq!(console.delete.phase(), FlowPhase::Idle);
    assert!(console.delete.staged_summary().is_none());
    assert_eq!(service.count("delete"), 0);
}

#[tokio::test]
async fn test_delete_confirm_removes_and_reloads() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    let summary = console.delete.search(&console.list, "RUTA_002").unwrap();
    assert_eq!(summary.public_id, "RUTA_002");
    assert_eq!(summary.state, "Completada");
    assert_eq!(summary.driver.as_deref(), Some("222"));
    assert_eq!(console.delete.phase(), FlowPhase::Confirming);

    let receipt = console.delete.confirm(&mut console.list).await.unwrap();

    assert_eq!(receipt.public_id, "RUTA_002");
    assert_eq!(console.delete.phase(), FlowPhase::Done);
    assert!(console.list.find("RUTA_002").is_none());
    assert_eq!(console.list.routes().len(), 3);
    assert_eq!(service.count("delete:2"), 1);
    assert_eq!(service.count("get_all"), 2);
}

#[tokio::test]
async fn test_delete_failure_keeps_route_staged() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();
    console.delete.search(&console.list, "RUTA_001").unwrap();

    service.fail("delete", ConsoleError::Server { status: 500, message: "Error: db".to_string() });
    let result = console.delete.confirm(&mut console.list).await;

    assert!(matches!(result, Err(ConsoleError::Server { status: 500, .. })));
    assert_eq!(console.delete.phase(), FlowPhase::Failed);
    assert_eq!(console.delete.staged_summary().unwrap().public_id, "RUTA_001");
    assert!(console.list.find("RUTA_001").is_some());

    service.recover("delete");
    console.delete.confirm(&mut console.list).await.unwrap();
    assert!(console.list.find("RUTA_001").is_none());
}

#[tokio::test]
async fn test_malformed_identifier_rejected_without_call() {
    let service = FakeRouteService::new(vec![backend_route(-7, None, 1, 1, 1)]);
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    console.delete.search(&console.list, "RUTA_-07").unwrap();
    let result = console.delete.confirm(&mut console.list).await;

    assert!(matches!(result, Err(ConsoleError::InvalidIdentifier(_))));
    assert_eq!(console.delete.phase(), FlowPhase::Failed);
    assert_eq!(service.count("delete"), 0);
}

#[tokio::test]
async fn test_confirm_without_staged_route() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    let result = console.delete.confirm(&mut console.list).await;
    assert_eq!(result.err(), Some(ConsoleError::NothingStaged));

    console.delete.search(&console.list, "RUTA_003").unwrap();
    console.delete.cancel();
    assert_eq!(console.delete.phase(), FlowPhase::Idle);
    assert!(console.delete.staged_summary().is_none());
}

#[tokio::test]
async fn test_mutation_succeeds_even_if_reload_fails() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();
    console.delete.search(&console.list, "RUTA_003").unwrap();

    service.fail("get_all", ConsoleError::Network("connection reset".to_string()));
    let receipt = console.delete.confirm(&mut console.list).await.unwrap();

    assert_eq!(console.delete.phase(), FlowPhase::Done);
    assert!(receipt.reload_warning.is_some());
    assert!(matches!(console.list.state(), ListState::Failed(_)));
}

#[tokio::test]
async fn test_auditor_and_driver_cannot_mutate() {
    let service = FakeRouteService::new(sample_routes());

    for (id, role) in [(MANAGER_ID, Role::Auditor), (DRIVER_ID, Role::Driver)] {
        let mut console = console(&service, id, role);
        console.list.load().await.unwrap();

        assert!(matches!(
            console.delete.search(&console.list, "RUTA_001"),
            Err(ConsoleError::Forbidden(_))
        ));
        assert!(matches!(
            console.create.submit(&mut console.list, new_route_form()).await,
            Err(ConsoleError::Forbidden(_))
        ));
    }

    assert_eq!(service.count("create"), 0);
    assert_eq!(service.count("delete"), 0);
}

#[tokio::test]
async fn test_ended_session_rejects_everything() {
    let service = FakeRouteService::new(sample_routes());
    let mut console = console(&service, MANAGER_ID, Role::Manager);
    console.list.load().await.unwrap();

    console.end();

    assert_eq!(console.list.load().await, Err(ConsoleError::SessionEnded));
    assert_eq!(
        console.delete.search(&console.list, "RUTA_001").err(),
        Some(ConsoleError::SessionEnded)
    );
    assert!(console.dashboard().actions.is_empty());
}
