pub mod course;
pub mod equipment;
pub mod facility;
pub mod reservation;
