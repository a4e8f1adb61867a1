use crate::model::id::{CourseId, EquipmentId, FacilityId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

pub mod event {
    use super::*;

    #[derive(Debug)]
    pub struct CreateCourseSchedule {
        pub day_of_week: i16,
        pub start_time: NaiveTime,
        pub end_time: NaiveTime,
    }

    #[derive(Debug)]
    pub struct CreateCourseEquipment {
        pub equipment_id: EquipmentId,
        pub quantity: i32,
    }

    #[derive(Debug)]
    pub struct CreateCourse {
        pub name: String,
        pub description: Option<String>,
        pub duration_minutes: i32,
        pub max_capacity: i32,
        pub price: f64,
        pub facility_id: Option<FacilityId>,
        pub image_url: Option<String>,
        pub starts_on: Option<NaiveDate>,
        pub starts_at: Option<NaiveTime>,
        pub schedules: Vec<CreateCourseSchedule>,
        pub equipment: Vec<CreateCourseEquipment>,
    }

    #[derive(Debug)]
    pub struct DeleteCourse {
        pub course_id: CourseId,
    }
}

#[derive(Debug)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub max_capacity: i32,
    pub available_spots: i32,
    pub price: f64,
    pub facility_id: Option<FacilityId>,
    pub image_url: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub starts_at: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub facility_name: Option<String>,
    pub is_terrain: Option<bool>,
}

#[derive(Debug)]
pub struct CourseSchedule {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug)]
pub struct CourseEquipmentLink {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub quantity: i32,
}

// 詳細表示用。コース本体にスケジュールと機材リンクを併せて返す
#[derive(Debug)]
pub struct CourseDetail {
    pub course: Course,
    pub schedules: Vec<CourseSchedule>,
    pub equipment: Vec<CourseEquipmentLink>,
}
