pub mod auth;
pub mod club;
pub mod i18n;
