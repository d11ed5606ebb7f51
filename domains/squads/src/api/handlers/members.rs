//! `GET /guilds/{gid}/squads/{sid}/members/paginated`

use axum::extract::{Path, Query, State};
use axum::Json;
use bytes_auth::AnyAuth;
use bytes_common::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::state::SquadsState;
use crate::domain::entities::{Squad, SquadMemberEntry};

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize)]
pub struct MembersPage {
    pub squad: Squad,
    pub members: Vec<SquadMemberEntry>,
    pub total_count: usize,
    pub page_info: PageInfo,
}

pub async fn list_members(
    _auth: AnyAuth,
    State(state): State<SquadsState>,
    Path((guild_id, squad_id)): Path<(String, Uuid)>,
    Query(query): Query<MembersQuery>,
) -> Result<Json<MembersPage>> {
    let squad = state.service.get_squad(&guild_id, squad_id).await?;
    let all = state.service.get_squad_members(squad_id).await?;

    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let offset = query.offset.unwrap_or(0);
    let total_count = all.len();
    let members: Vec<SquadMemberEntry> = all.into_iter().skip(offset).take(limit).collect();
    let has_more = offset + members.len() < total_count;

    Ok(Json(MembersPage {
        squad,
        members,
        total_count,
        page_info: PageInfo {
            limit,
            offset,
            has_more,
        },
    }))
}
