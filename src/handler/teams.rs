use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use futures::future::join_all;
use serde_json::json;
use uuid::Uuid;

use crate::{
    db::{teamdb::TeamExt, userdb::UserExt},
    dtos::teamdtos::AddTeamMemberDto,
    error::HttpError,
    models::teammodel::Team,
    service::error::ServiceError,
    AppState,
};

pub fn teams_handler() -> Router {
    Router::new()
        .route("/", get(get_all_teams))
        .route("/members", post(add_team_member))
        .route("/members/:membership_id/deactivate", put(deactivate_team_member))
}

// Every leader with at least one active member, with member summaries.
pub async fn get_all_teams(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let leaders = app_state
        .db_client
        .get_team_leaders()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if leaders.is_empty() {
        return Err(ServiceError::TeamNotFound.into());
    }

    let members_by_leader = join_all(
        leaders
            .iter()
            .map(|leader| app_state.db_client.get_team_members(leader.leader_id)),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let teams: Vec<Team> = leaders
        .into_iter()
        .zip(members_by_leader)
        .map(|(leader, members)| Team {
            leader_id: leader.leader_id,
            leader_name: leader.leader_name,
            members,
        })
        .collect();

    Ok(Json(json!({ "success": true, "data": teams })))
}

pub async fn add_team_member(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AddTeamMemberDto>,
) -> Result<impl IntoResponse, HttpError> {
    if body.leader_id == body.agent_id {
        return Err(HttpError::bad_request(
            "A leader cannot be added as their own team member",
        ));
    }

    app_state
        .db_client
        .get_user(body.leader_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(body.leader_id))?;

    app_state
        .db_client
        .get_user(body.agent_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(ServiceError::UserNotFound(body.agent_id))?;

    let membership = app_state
        .db_client
        .add_team_member(body.leader_id, body.agent_id)
        .await
        .map_err(ServiceError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": membership,
            "message": "Team member added successfully"
        })),
    ))
}

pub async fn deactivate_team_member(
    Path(membership_id): Path<Uuid>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let membership = app_state
        .db_client
        .deactivate_team_member(membership_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found(format!("Team membership {} not found", membership_id))
        })?;

    Ok(Json(json!({
        "success": true,
        "data": membership,
        "message": "Team member deactivated successfully"
    })))
}
