use axum::extract::State;
use crm_core::records::Todo;

use super::{found, RecordPath};
use crate::error::AppResult;
use crate::response::NormalizedResponse;
use crate::state::AppState;

/// GET /todos
pub async fn list_todos(State(state): State<AppState>) -> AppResult<NormalizedResponse> {
    let todos = state.store.list_todos().await?;
    NormalizedResponse::list::<Todo>(&todos)
}

/// GET /todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    RecordPath(id): RecordPath,
) -> AppResult<NormalizedResponse> {
    let todo = found(state.store.find_todo(id).await?, id)?;
    NormalizedResponse::single(&todo)
}
