use crate::{
    extractor::AuthorizedUser,
    model::course::{CourseDetailResponse, CourseResponse, CoursesResponse, CreateCourseRequest},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    course::event::DeleteCourse,
    id::CourseId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// コースの登録は管理者のみ
pub async fn register_course(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<CourseResponse>)> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    req.validate(&())?;

    let course = registry
        .course_repository()
        .create(req.into(), user.id())
        .await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

pub async fn show_course_list(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CoursesResponse>> {
    registry
        .course_repository()
        .find_all()
        .await
        .map(CoursesResponse::from)
        .map(Json)
}

pub async fn show_course(
    _user: AuthorizedUser,
    Path(course_id): Path<CourseId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CourseDetailResponse>> {
    registry
        .course_repository()
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("コース（{course_id}）が見つかりませんでした。"))
        })
        .map(CourseDetailResponse::from)
        .map(Json)
}

// コースの削除は管理者のみ
pub async fn delete_course(
    user: AuthorizedUser,
    Path(course_id): Path<CourseId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }

    registry
        .course_repository()
        .delete(DeleteCourse { course_id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
