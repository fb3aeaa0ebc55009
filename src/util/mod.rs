pub mod time;
pub mod worker;
