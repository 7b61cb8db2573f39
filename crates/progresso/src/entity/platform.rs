//! Platform enum for type-safe handling of the supported practice sites.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supported coding-practice platforms.
///
/// Stored as the platform's display name, which is also the value the read
/// endpoint returns in each row.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Platform {
    #[sea_orm(string_value = "LeetCode")]
    LeetCode,
    #[sea_orm(string_value = "GeeksforGeeks")]
    GeeksforGeeks,
    #[sea_orm(string_value = "Codeforces")]
    Codeforces,
}

impl Platform {
    /// All platforms in the fixed order sync results are merged in.
    pub const ALL: [Platform; 3] = [
        Platform::LeetCode,
        Platform::GeeksforGeeks,
        Platform::Codeforces,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::GeeksforGeeks => "GeeksforGeeks",
            Platform::Codeforces => "Codeforces",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
