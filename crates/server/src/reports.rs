//! Balance and settlement endpoints. Every call reads a fresh snapshot.

use api_types::{ApiResponse, balance::BalanceView, settlement::SettlementView};
use axum::{Json, extract::State};

use crate::{
    ServerError,
    server::ServerState,
    views::{balance_view, settlement_view},
};

pub async fn balances(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<BalanceView>>>, ServerError> {
    let balances = state.engine.balances().await?;
    Ok(Json(ApiResponse::ok_with_message(
        balances.into_iter().map(balance_view).collect(),
        "balances calculated",
    )))
}

pub async fn settlements(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<SettlementView>>>, ServerError> {
    let settlements = state.engine.settlements().await?;
    Ok(Json(ApiResponse::ok_with_message(
        settlements.into_iter().map(settlement_view).collect(),
        "settlements calculated",
    )))
}

pub async fn people(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ServerError> {
    let people = state.engine.people().await?;
    Ok(Json(ApiResponse::ok_with_message(
        people.into_iter().map(|person| person.into_string()).collect(),
        "people fetched",
    )))
}
