//! Common re-exports for convenient entity usage.

pub use super::platform::Platform;
pub use super::user_problem::{
    ActiveModel as UserProblemActiveModel, Column as UserProblemColumn, Entity as UserProblem,
    Model as UserProblemModel,
};
pub use super::user_profile::{
    ActiveModel as UserProfileActiveModel, Column as UserProfileColumn, Entity as UserProfile,
    Model as UserProfileModel,
};
