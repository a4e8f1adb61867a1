pub mod course;
pub mod equipment;
pub mod facility;
pub mod health;
pub mod reservation;
pub mod v1;
