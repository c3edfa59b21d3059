mod auth;
mod profile;
