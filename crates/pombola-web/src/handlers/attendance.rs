//! Committee attendance dashboard handler

use axum::extract::{Query, State};

use pombola_core::attendance::{load_attendance_context, AttendanceQuery};

use crate::{error::AppError, state::AppState, templates::AttendanceTemplate};

pub async fn mp_attendance(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<AttendanceTemplate, AppError> {
    let query = AttendanceQuery::from_pairs(&params);
    let ctx = load_attendance_context(
        state.client(),
        state.cache(),
        &state.config().attendance_url,
        state.positions(),
        &query,
    )
    .await?;

    Ok(ctx.into())
}
