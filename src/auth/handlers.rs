use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    middleware,
    routing::{get, post},
    Extension, Json,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, RegisterResponse, SessionResponse, UserPageResponse},
        middleware::authenticate_user,
        password::{hash_password, verify_password},
        repo_types::{NewUser, User},
        token::generate_access_token,
    },
    error::ApiError,
    routes::RouteTable,
    state::AppState,
};

pub fn auth_routes(state: &AppState) -> RouteTable<AppState> {
    RouteTable::new()
        .route("/users", Method::POST, post(register))
        .route_with(
            "/user-page",
            Method::GET,
            &["authenticate_user"],
            get(user_page).route_layer(middleware::from_fn_with_state(
                state.clone(),
                authenticate_user,
            )),
        )
        .route("/sessions", Method::POST, post(login))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(error = %rejection, "rejected request body");
            Err(ApiError::BadRequest(rejection.body_text()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let payload = json_body(payload)?;

    if !payload.has_all_fields() {
        warn!("registration with missing fields");
        return Err(ApiError::BadRequest("All fields are required".into()));
    }

    // Ensure email is not taken
    let existing = match state.store.find_by_email(&payload.email.to_lowercase()).await {
        Ok(existing) => existing,
        Err(e) => {
            error!(error = %e, "find_by_email failed during registration");
            return Err(ApiError::create_failed(&e));
        }
    };
    if existing.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "hash_password failed");
            return Err(ApiError::CreateFailed {
                response: e.to_string(),
                errors: None,
            });
        }
    };

    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        password_hash,
        access_token: generate_access_token(),
    };
    let user = match state.store.insert(new_user).await {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, "create user failed");
            return Err(ApiError::create_failed(&e));
        }
    };

    info!(user_id = %user.id, name = %user.name, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            access_token: user.access_token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let payload = json_body(payload)?;

    let user = match state.store.find_by_email(&payload.email.to_lowercase()).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::EmptyNotFound);
        }
    };

    let ok = match verify_password(&payload.password, &user.password_hash) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            return Err(e.into());
        }
    };

    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::EmptyBadRequest);
    }

    info!(user_id = %user.id, "user logged in");
    Ok(Json(SessionResponse {
        user_id: user.id,
        access_token: user.access_token,
    }))
}

pub async fn user_page(Extension(user): Extension<User>) -> Json<UserPageResponse> {
    debug!(user_id = %user.id, "user page");
    Json(UserPageResponse {
        message: "You are logged in!",
        user,
    })
}
