pub mod course;
pub mod equipment;
pub mod facility;
pub mod id;
pub mod reservation;
pub mod role;
pub mod setting;
