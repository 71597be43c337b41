pub mod experiences;
pub mod health;
pub mod projects;
