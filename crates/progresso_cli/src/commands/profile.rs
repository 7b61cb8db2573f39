use chrono::Utc;
use sea_orm::DatabaseConnection;

use progresso::UserProfileLinks;
use progresso::db;
use progresso::profile::{self, find_links, save_links};

use super::{OutputFormat, print_rows};
use crate::ProfileAction;

#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
struct LinkRow {
    #[tabled(rename = "Platform")]
    platform: &'static str,
    #[tabled(rename = "Identity")]
    identity: String,
}

fn link_rows(links: &UserProfileLinks) -> Vec<LinkRow> {
    let show = |value: Option<&str>| value.unwrap_or("-").to_string();
    vec![
        LinkRow {
            platform: "LeetCode",
            identity: show(links.leetcode_url()),
        },
        LinkRow {
            platform: "GeeksforGeeks",
            identity: show(links.geeksforgeeks_username()),
        },
        LinkRow {
            platform: "Codeforces",
            identity: show(links.codeforces_handle()),
        },
    ]
}

async fn set_links(
    db: &DatabaseConnection,
    user_id: &str,
    links: UserProfileLinks,
) -> profile::Result<()> {
    save_links(db, user_id, &links, Utc::now()).await?;
    tracing::info!(user_id, "Saved profile links");
    Ok(())
}

pub(crate) async fn handle_profile(
    action: ProfileAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_conn = db::connect_and_migrate(database_url).await?;

    match action {
        ProfileAction::Set {
            user_id,
            leetcode_url,
            geeksforgeeks_username,
            codeforces_handle,
        } => {
            let links = UserProfileLinks {
                leetcode_url,
                geeksforgeeks_username,
                codeforces_handle,
            };
            if links.is_empty() {
                println!("No identities given; {user_id} will have nothing to sync.");
            }
            set_links(&db_conn, &user_id, links).await?;
            println!("Saved profile links for {user_id}.");
        }
        ProfileAction::Show { user_id, output } => match find_links(&db_conn, &user_id).await? {
            Some(links) => match output {
                OutputFormat::Table => print_rows(link_rows(&links), output)?,
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
            },
            None => println!("No profile links stored for {user_id}."),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_rows_mark_missing_identities() {
        let links = UserProfileLinks {
            leetcode_url: None,
            geeksforgeeks_username: Some("  ".to_string()),
            codeforces_handle: Some("tourist".to_string()),
        };
        let rows = link_rows(&links);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].identity, "-");
        assert_eq!(rows[1].identity, "-");
        assert_eq!(rows[2].identity, "tourist");
    }

    #[tokio::test]
    async fn set_links_replaces_previous_links() {
        let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();

        set_links(
            &db,
            "u1",
            UserProfileLinks {
                codeforces_handle: Some("tourist".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        set_links(
            &db,
            "u1",
            UserProfileLinks {
                geeksforgeeks_username: Some("gfg_user".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = find_links(&db, "u1").await.unwrap().unwrap();
        assert_eq!(stored.codeforces_handle(), None);
        assert_eq!(stored.geeksforgeeks_username(), Some("gfg_user"));
    }
}
