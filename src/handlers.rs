use crate::controller::SubmitOutcome;
use crate::errors::AppError;
use crate::models::{MoodForm, SubmitMoodRequest, ViewState};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.controller.snapshot().await;
    Html(render_index(&view))
}

pub async fn get_state(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.controller.snapshot().await)
}

pub async fn submit_form(State(state): State<AppState>, Form(form): Form<MoodForm>) -> Redirect {
    state.controller.submit(&form.mood).await;
    Redirect::to("/")
}

pub async fn submit_json(
    State(state): State<AppState>,
    Json(payload): Json<SubmitMoodRequest>,
) -> Result<Json<ViewState>, AppError> {
    if state.controller.submit(&payload.mood).await == SubmitOutcome::Rejected {
        return Err(AppError::bad_request("mood must not be empty"));
    }
    Ok(Json(state.controller.snapshot().await))
}

pub async fn reload(State(state): State<AppState>) -> Json<ViewState> {
    state.controller.load_moods().await;
    Json(state.controller.snapshot().await)
}
