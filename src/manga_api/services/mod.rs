pub mod health;
pub mod manga;
