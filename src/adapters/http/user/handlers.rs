//! HTTP handlers for user and profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::user::{
    DeleteImageCommand, DeleteImageHandler, EditProfileCommand, EditProfileHandler,
    GetMeHandler, GetMeQuery, GetProfileHandler, GetProfileQuery, ProfileExistsHandler,
    ProfileExistsQuery, SetImageCommand, SetImageHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::ProfileUpdate;

use super::dto::{
    EditProfileRequest, EditProfileResponse, ErrorResponse, ExistsResponse, MeResponse,
    ProfileResponse, SetImageResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    get_me_handler: Arc<GetMeHandler>,
    edit_handler: Arc<EditProfileHandler>,
    get_profile_handler: Arc<GetProfileHandler>,
    exists_handler: Arc<ProfileExistsHandler>,
    set_image_handler: Arc<SetImageHandler>,
    delete_image_handler: Arc<DeleteImageHandler>,
}

impl UserHandlers {
    pub fn new(
        get_me_handler: Arc<GetMeHandler>,
        edit_handler: Arc<EditProfileHandler>,
        get_profile_handler: Arc<GetProfileHandler>,
        exists_handler: Arc<ProfileExistsHandler>,
        set_image_handler: Arc<SetImageHandler>,
        delete_image_handler: Arc<DeleteImageHandler>,
    ) -> Self {
        Self {
            get_me_handler,
            edit_handler,
            get_profile_handler,
            exists_handler,
            set_image_handler,
            delete_image_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/me - The caller's own profile
pub async fn get_me(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetMeQuery { user_id: user.id };

    match handlers.get_me_handler.handle(query).await {
        Ok(me) => (StatusCode::OK, Json(MeResponse::from(me))).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// PATCH /api/me - Edit name and/or username
pub async fn edit_profile(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<EditProfileRequest>,
) -> Response {
    let cmd = EditProfileCommand {
        user_id: user.id,
        update: ProfileUpdate {
            name: req.name,
            username: req.username,
        },
    };

    match handlers.edit_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(EditProfileResponse {
                username: result.username,
            }),
        )
            .into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/profiles/{username} - Public profile page
pub async fn get_profile(
    State(handlers): State<UserHandlers>,
    Path(username): Path<String>,
) -> Response {
    let query = GetProfileQuery { username };

    match handlers.get_profile_handler.handle(query).await {
        Ok(profile) => {
            (StatusCode::OK, Json(ProfileResponse::from(profile))).into_response()
        }
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/profiles/{username}/exists - Username availability
pub async fn profile_exists(
    State(handlers): State<UserHandlers>,
    Path(username): Path<String>,
) -> Response {
    let query = ProfileExistsQuery { username };

    match handlers.exists_handler.handle(query).await {
        Ok(exists) => (StatusCode::OK, Json(ExistsResponse { exists })).into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// PUT /api/me/image - Replace the profile image
pub async fn set_image(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = SetImageCommand { user };

    match handlers.set_image_handler.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SetImageResponse {
                image: result.image.as_str().to_string(),
                upload_url: result.upload_url,
            }),
        )
            .into_response(),
        Err(e) => handle_user_error(e),
    }
}

/// DELETE /api/me/image - Remove the profile image
pub async fn delete_image(
    State(handlers): State<UserHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = DeleteImageCommand { user };

    match handlers.delete_image_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_user_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_user_error(error: DomainError) -> Response {
    match error.code {
        ErrorCode::ValidationFailed => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.message)),
        )
            .into_response(),
        ErrorCode::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.message)),
        )
            .into_response(),
        ErrorCode::Conflict => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.message)),
        )
            .into_response(),
        ErrorCode::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                code: "UNAUTHORIZED".to_string(),
                message: error.message,
                details: None,
            }),
        )
            .into_response(),
        ErrorCode::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                code: "FORBIDDEN".to_string(),
                message: error.message,
                details: None,
            }),
        )
            .into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal("Something went wrong")),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_validation_maps_to_400() {
        let error = DomainError::validation("username", "too short");
        let response = handle_user_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn user_error_conflict_maps_to_409() {
        let error = DomainError::conflict("Email or username already exists");
        let response = handle_user_error(error);
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn user_error_not_found_maps_to_404() {
        let error = DomainError::not_found("User not found");
        let response = handle_user_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn user_error_storage_maps_to_500() {
        let error = DomainError::new(ErrorCode::StorageError, "bucket gone");
        let response = handle_user_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
