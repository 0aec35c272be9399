use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::console_session::ConsoleSession;
use crate::controllers::mutation_flow::MutationReceipt;
use crate::controllers::route_list_controller::ListState;
use crate::dto::console_dto::{
    ApiResponse, DashboardResponse, DeleteStagedResponse, MutationResponse, NavigationResponse,
    RouteCounts, RoutesResponse, SearchRequest,
};
use crate::middleware::session::AuthenticatedSession;
use crate::models::notification::Notification;
use crate::models::route::RouteForm;
use crate::state::AppState;
use crate::utils::errors::ConsoleResult;

pub fn create_console_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/reload", post(reload))
        .route("/routes", get(list_routes).post(create_route))
        .route("/routes/retry", post(retry_create))
        .route("/routes/:public_id", put(update_route))
        .route("/update/search", post(update_search))
        .route("/update/retry", post(retry_update))
        .route("/delete/search", post(delete_search))
        .route("/delete/confirm", post(delete_confirm))
        .route("/delete/cancel", post(delete_cancel))
        .route("/logout", post(logout))
}

fn routes_response(console: &ConsoleSession) -> RoutesResponse {
    RoutesResponse {
        status: console.list.state().as_str(),
        routes: console.list.routes().to_vec(),
        counts: RouteCounts {
            total: console.list.routes().len(),
            active: console.list.active_count(),
            completed: console.list.completed_count(),
        },
    }
}

fn mutation_response(receipt: MutationReceipt) -> Json<ApiResponse<MutationResponse>> {
    let notification = receipt.notification.clone();
    Json(ApiResponse::success_with_notification(
        MutationResponse::from(receipt),
        notification,
    ))
}

async fn dashboard(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<DashboardResponse>>> {
    let console = session.console.lock().await;
    Ok(Json(ApiResponse::success(DashboardResponse::new(
        session.user.clone(),
        console.dashboard(),
    ))))
}

async fn reload(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<RoutesResponse>>> {
    let mut console = session.console.lock().await;
    console.list.load().await?;
    Ok(Json(ApiResponse::success(routes_response(&console))))
}

async fn list_routes(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<RoutesResponse>>> {
    let mut console = session.console.lock().await;
    console.list.ensure_loaded().await?;
    if let ListState::Failed(error) = console.list.state() {
        return Err(error.clone());
    }
    Ok(Json(ApiResponse::success(routes_response(&console))))
}

async fn create_route(
    Extension(session): Extension<AuthenticatedSession>,
    Json(form): Json<RouteForm>,
) -> ConsoleResult<Json<ApiResponse<MutationResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    console.list.ensure_loaded().await?;
    let receipt = console.create.submit(&mut console.list, form).await?;
    Ok(mutation_response(receipt))
}

async fn retry_create(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<MutationResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    let receipt = console.create.retry(&mut console.list).await?;
    Ok(mutation_response(receipt))
}

async fn update_search(
    Extension(session): Extension<AuthenticatedSession>,
    Json(request): Json<SearchRequest>,
) -> ConsoleResult<Json<ApiResponse<NavigationResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    console.list.ensure_loaded().await?;
    let navigation = console.update.search(&console.list, &request.public_id)?;
    Ok(Json(ApiResponse::success(NavigationResponse::from(navigation))))
}

async fn update_route(
    Extension(session): Extension<AuthenticatedSession>,
    Path(public_id): Path<String>,
    Json(form): Json<RouteForm>,
) -> ConsoleResult<Json<ApiResponse<MutationResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    console.list.ensure_loaded().await?;
    let receipt = console.update.submit(&mut console.list, &public_id, form).await?;
    Ok(mutation_response(receipt))
}

async fn retry_update(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<MutationResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    let receipt = console.update.retry(&mut console.list).await?;
    Ok(mutation_response(receipt))
}

async fn delete_search(
    Extension(session): Extension<AuthenticatedSession>,
    Json(request): Json<SearchRequest>,
) -> ConsoleResult<Json<ApiResponse<DeleteStagedResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    console.list.ensure_loaded().await?;
    let route = console.delete.search(&console.list, &request.public_id)?;
    Ok(Json(ApiResponse::success(DeleteStagedResponse {
        phase: console.delete.phase(),
        route,
    })))
}

async fn delete_confirm(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<MutationResponse>>> {
    let mut guard = session.console.lock().await;
    let console = &mut *guard;
    let receipt = console.delete.confirm(&mut console.list).await?;
    Ok(mutation_response(receipt))
}

async fn delete_cancel(
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<DashboardResponse>>> {
    let mut console = session.console.lock().await;
    console.delete.cancel();
    Ok(Json(ApiResponse::success(DashboardResponse::new(
        session.user.clone(),
        console.dashboard(),
    ))))
}

async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
) -> ConsoleResult<Json<ApiResponse<bool>>> {
    let ended = state.end_session(&session.user.id).await;
    Ok(Json(ApiResponse::success_with_notification(
        ended,
        Notification::success("Sesión cerrada"),
    )))
}
