//! SeaORM entity definitions for the progresso database schema.

pub mod platform;
pub mod prelude;
pub mod user_problem;
pub mod user_profile;
