pub mod attempts;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod modules;
pub mod progress;
pub mod quizzes;
