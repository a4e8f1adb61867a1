use axum::{extract::FromRequestParts, http::request::Parts};
use kernel::model::{id::UserId, role::Role};
use registry::AppRegistry;
use shared::error::AppError;

// 認証は上流の API ゲートウェイが行い、検証済みのユーザー情報を
// x-user-id / x-user-role ヘッダーで引き渡してくる前提
pub struct AuthorizedUser {
    pub user_id: UserId,
    pub role: Role,
}

impl AuthorizedUser {
    pub fn id(&self) -> UserId {
        self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[axum::async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<UserId>().ok())
            .ok_or(AppError::Unauthenticated)?;

        let role = parts
            .headers
            .get("x-user-role")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<Role>().ok())
            .ok_or(AppError::Unauthenticated)?;

        Ok(Self { user_id, role })
    }
}
