pub mod activity;
pub mod auth;
pub mod club;
pub mod contribution;
pub mod dashboard;
pub mod member;
