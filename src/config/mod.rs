pub mod jwt;
pub mod redis;
pub mod settings;
