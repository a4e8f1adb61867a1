use crate::model::{
    course::{
        event::{CreateCourse, DeleteCourse},
        Course, CourseDetail,
    },
    id::{CourseId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    // コースを登録する。テラン施設と開催日時が指定されていれば
    // 同一トランザクションで施設予約も自動作成する
    async fn create(&self, event: CreateCourse, registered_by: UserId) -> AppResult<Course>;
    async fn find_all(&self) -> AppResult<Vec<Course>>;
    async fn find_by_id(&self, course_id: CourseId) -> AppResult<Option<CourseDetail>>;
    // コースを削除する。機材在庫の復元と施設予約のキャンセルを伴う
    async fn delete(&self, event: DeleteCourse) -> AppResult<()>;
}
