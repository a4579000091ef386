pub mod events;
pub mod interactive;
pub mod month;
