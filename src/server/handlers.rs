use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::core::game::{is_guess_reasonable, validate_guess, Session};
use crate::core::session::new_session_id;
use crate::core::GameError;
use crate::hints;
use crate::server::cookie::{session_id, set_cookie};
use crate::server::SharedState;

const UNREADABLE_BODY: &str = "Request body must be a JSON object";

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    #[serde(default)]
    guess: Option<Value>,
    #[serde(default)]
    get_hint: Option<Value>,
}

impl GuessRequest {
    /// Only a literal `true` asks for a hint; `null`, numbers and strings do not.
    fn wants_hint(&self) -> bool {
        matches!(self.get_hint, Some(Value::Bool(true)))
    }
}

/// Active session for the request's cookie, or a state error.
async fn active_session(
    state: &SharedState,
    headers: &HeaderMap,
) -> Result<(String, Session), GameError> {
    let id = session_id(headers).ok_or_else(GameError::no_active_game)?;
    let session = state
        .sessions
        .load(&id)
        .await
        .filter(Session::is_active)
        .ok_or_else(GameError::no_active_game)?;
    Ok((id, session))
}

// ── GET ─────────────────────────────────────────────────────────────

pub async fn handle_health_check() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

pub async fn handle_status(State(state): State<SharedState>, headers: HeaderMap) -> Json<Value> {
    match active_session(&state, &headers).await {
        Ok((_, session)) => Json(json!({
            "game_active": true,
            "attempts": session.attempts(),
            "guesses": session.guesses(),
        })),
        Err(_) => Json(json!({ "game_active": false, "message": "No active game" })),
    }
}

pub async fn handle_hints(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, GameError> {
    let (_, session) = active_session(&state, &headers).await?;
    let guesses = session.guesses();
    let secret = session.secret_number();

    Ok(Json(json!({
        "strategy": hints::strategy_hint(guesses, secret),
        "encouragement": hints::encouragement_hint(session.attempts()),
        "binary_search": hints::binary_search_hint(guesses, secret),
        "suggested_guess": hints::suggest_binary_search_guess(guesses, secret),
        "statistics": session.statistics(),
    })))
}

// ── POST ────────────────────────────────────────────────────────────

pub async fn handle_start(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    // Only reuse a cookie id this server issued and still holds.
    let id = match session_id(&headers) {
        Some(id) if state.sessions.load(&id).await.is_some() => id,
        _ => new_session_id(),
    };
    let session = {
        let mut rng = state.rng.lock().await;
        Session::start(&mut **rng)
    };
    let secret = session.secret_number();
    state.sessions.save(&id, session).await;
    info!(session = %id, "game started");
    debug!(session = %id, secret, "secret chosen");

    let mut body = json!({
        "message": "Game started! Guess a number between 1 and 100.",
        "attempts": 0,
    });
    if state.config.reveal_secret {
        body["secret_number"] = json!(secret);
    }

    let mut response = Json(body).into_response();
    if let Some(cookie) = set_cookie(&id) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

pub async fn handle_guess(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<Value>, GameError> {
    let (id, mut session) = active_session(&state, &headers).await?;

    let Json(req) = body.map_err(|rejection| {
        debug!(session = %id, error = %rejection, "unreadable guess body");
        GameError::validation(UNREADABLE_BODY)
    })?;
    let guess = validate_guess(req.guess.as_ref().unwrap_or(&Value::Null))?;

    let reasonable = is_guess_reasonable(guess, session.guesses(), session.secret_number());
    let result = session.record_guess(guess)?;
    let ai_hint = if req.wants_hint() && !result.correct {
        let mut rng = state.rng.lock().await;
        Some(hints::generate_hint(
            guess,
            session.secret_number(),
            session.guesses(),
            &mut **rng,
        ))
    } else {
        None
    };
    info!(
        session = %id,
        guess,
        outcome = ?result.outcome,
        attempts = session.attempts(),
        "guess recorded"
    );

    let mut response = json!({
        "guess": guess,
        "result": result.message,
        "outcome": result.outcome,
        "correct": result.correct,
        "reasonable": reasonable,
        "attempts": session.attempts(),
        "guesses": session.guesses(),
    });
    if let Some(hint) = ai_hint {
        response["ai_hint"] = json!(hint);
    }
    if result.correct {
        response["game_over"] = json!(true);
        response["final_message"] = json!(format!(
            "Congratulations! You found the number in {} attempts!",
            session.attempts()
        ));
    }

    state.sessions.save(&id, session).await;
    Ok(Json(response))
}

pub async fn handle_reset(State(state): State<SharedState>, headers: HeaderMap) -> Json<Value> {
    if let Some(id) = session_id(&headers) {
        if state.sessions.remove(&id).await.is_some() {
            info!(session = %id, "game reset");
        }
    }
    Json(json!({ "message": "Game reset successfully" }))
}
