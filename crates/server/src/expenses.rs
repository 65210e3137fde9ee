//! Expense API endpoints

use api_types::{
    ApiResponse,
    expense::{ExpenseDeleted, ExpenseNew, ExpenseUpdate, ExpenseView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{ExpenseCmd, ExpenseUpdateCmd, MoneyCents};

use crate::{ServerError, server::ServerState, views::expense_view};

/// Handle requests for recording a new expense
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseView>>), ServerError> {
    let amount = MoneyCents::from_major(payload.amount)?;
    let mut cmd = ExpenseCmd::new(amount, payload.description, payload.paid_by);
    if let Some(participants) = payload.participants {
        cmd = cmd.participants(participants);
    }

    let expense = state.engine.create_expense(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            expense_view(expense),
            "expense created",
        )),
    ))
}

/// Handle requests for listing every expense, oldest first
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<ExpenseView>>>, ServerError> {
    let expenses = state.engine.list_expenses().await?;
    Ok(Json(ApiResponse::ok_with_message(
        expenses.into_iter().map(expense_view).collect(),
        "expenses fetched",
    )))
}

/// Handle requests for a single expense
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ExpenseView>>, ServerError> {
    let expense = state.engine.expense(&id).await?;
    Ok(Json(ApiResponse::ok(expense_view(expense))))
}

/// Handle partial updates of an expense
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ApiResponse<ExpenseView>>, ServerError> {
    let mut cmd = ExpenseUpdateCmd::default();
    if let Some(amount) = payload.amount {
        cmd = cmd.amount(MoneyCents::from_major(amount)?);
    }
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }
    if let Some(paid_by) = payload.paid_by {
        cmd = cmd.paid_by(paid_by);
    }
    if let Some(participants) = payload.participants {
        cmd = cmd.participants(participants);
    }
    if cmd.is_empty() {
        return Err(ServerError::Generic(
            "at least one field must be provided".to_string(),
        ));
    }

    let expense = state.engine.update_expense(&id, cmd).await?;
    Ok(Json(ApiResponse::ok_with_message(
        expense_view(expense),
        "expense updated",
    )))
}

/// Handle requests for deleting an expense
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ExpenseDeleted>>, ServerError> {
    let id = state.engine.delete_expense(&id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        ExpenseDeleted { id },
        "expense deleted",
    )))
}
