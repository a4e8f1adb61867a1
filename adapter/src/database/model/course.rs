use kernel::model::{
    course::{Course, CourseEquipmentLink, CourseSchedule},
    id::{CourseId, EquipmentId, FacilityId},
};
use sqlx::types::chrono::{DateTime, NaiveDate, NaiveTime, Utc};

#[derive(sqlx::FromRow)]
pub struct CourseRow {
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

impl From<CourseRow> for Course {
    fn from(value: CourseRow) -> Self {
        let CourseRow {
            id,
            name,
            description,
            duration_minutes,
            max_capacity,
            available_spots,
            price,
            facility_id,
            image_url,
            starts_on,
            starts_at,
            created_at,
            facility_name,
            is_terrain,
        } = value;
        Course {
            id,
            name,
            description,
            duration_minutes,
            max_capacity,
            available_spots,
            price,
            facility_id,
            image_url,
            starts_on,
            starts_at,
            created_at,
            facility_name,
            is_terrain,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct CourseScheduleRow {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<CourseScheduleRow> for CourseSchedule {
    fn from(value: CourseScheduleRow) -> Self {
        CourseSchedule {
            day_of_week: value.day_of_week,
            start_time: value.start_time,
            end_time: value.end_time,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct CourseEquipmentRow {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub quantity: i32,
}

impl From<CourseEquipmentRow> for CourseEquipmentLink {
    fn from(value: CourseEquipmentRow) -> Self {
        CourseEquipmentLink {
            equipment_id: value.equipment_id,
            equipment_name: value.equipment_name,
            quantity: value.quantity,
        }
    }
}
