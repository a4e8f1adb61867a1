use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use garde::Validate;
use kernel::model::{
    course::{
        event::{CreateCourse, CreateCourseEquipment, CreateCourseSchedule},
        Course, CourseDetail, CourseEquipmentLink, CourseSchedule,
    },
    id::{CourseId, EquipmentId, FacilityId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(range(min = 1))]
    pub duration_minutes: i32,
    #[garde(range(min = 0))]
    pub max_capacity: i32,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(skip)]
    pub facility_id: Option<FacilityId>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(skip)]
    pub starts_on: Option<NaiveDate>,
    #[garde(skip)]
    pub starts_at: Option<NaiveTime>,
    #[garde(dive)]
    #[serde(default)]
    pub schedules: Vec<CourseScheduleRequest>,
    #[garde(dive)]
    #[serde(default)]
    pub equipment: Vec<CourseEquipmentRequest>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseScheduleRequest {
    #[garde(range(min = 0, max = 6))]
    pub day_of_week: i16,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseEquipmentRequest {
    #[garde(skip)]
    pub equipment_id: EquipmentId,
    #[garde(range(min = 1))]
    pub quantity: i32,
}

impl From<CreateCourseRequest> for CreateCourse {
    fn from(value: CreateCourseRequest) -> Self {
        let CreateCourseRequest {
            name,
            description,
            duration_minutes,
            max_capacity,
            price,
            facility_id,
            image_url,
            starts_on,
            starts_at,
            schedules,
            equipment,
        } = value;
        CreateCourse {
            name,
            description,
            duration_minutes,
            max_capacity,
            price,
            facility_id,
            image_url,
            starts_on,
            starts_at,
            schedules: schedules
                .into_iter()
                .map(|s| CreateCourseSchedule {
                    day_of_week: s.day_of_week,
                    start_time: s.start_time,
                    end_time: s.end_time,
                })
                .collect(),
            equipment: equipment
                .into_iter()
                .map(|e| CreateCourseEquipment {
                    equipment_id: e.equipment_id,
                    quantity: e.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesResponse {
    pub items: Vec<CourseResponse>,
}

impl From<Vec<Course>> for CoursesResponse {
    fn from(value: Vec<Course>) -> Self {
        Self {
            items: value.into_iter().map(CourseResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
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

impl From<Course> for CourseResponse {
    fn from(value: Course) -> Self {
        let Course {
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
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub schedules: Vec<CourseScheduleResponse>,
    pub equipment: Vec<CourseEquipmentResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(value: CourseDetail) -> Self {
        Self {
            course: value.course.into(),
            schedules: value.schedules.into_iter().map(Into::into).collect(),
            equipment: value.equipment.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseScheduleResponse {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<CourseSchedule> for CourseScheduleResponse {
    fn from(value: CourseSchedule) -> Self {
        Self {
            day_of_week: value.day_of_week,
            start_time: value.start_time,
            end_time: value.end_time,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEquipmentResponse {
    pub equipment_id: EquipmentId,
    pub equipment_name: String,
    pub quantity: i32,
}

impl From<CourseEquipmentLink> for CourseEquipmentResponse {
    fn from(value: CourseEquipmentLink) -> Self {
        Self {
            equipment_id: value.equipment_id,
            equipment_name: value.equipment_name,
            quantity: value.quantity,
        }
    }
}
