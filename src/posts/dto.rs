use serde::{Deserialize, Serialize};

use crate::{posts::repo::PostWithAuthor, users::dto::PublicUser};

/// Request body for creating a post. The client supplies the author id,
/// which must resolve to an existing user.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    #[serde(default = "default_published")]
    pub published: bool,
    pub author_id: i64,
}

fn default_published() -> bool {
    true
}

/// Post representation with the author's public view nested.
#[derive(Debug, Serialize)]
pub struct PublicPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author: PublicUser,
}

impl From<PostWithAuthor> for PublicPost {
    fn from(row: PostWithAuthor) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            published: row.published,
            author: PublicUser {
                id: row.author_id,
                username: row.author_username,
                email: row.author_email,
            },
        }
    }
}

/// Query parameters for listing posts.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_published")]
    pub published: bool,
    pub search: Option<String>,
}

fn default_limit() -> i64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_post_published_defaults_to_true() {
        let post: CreatePost =
            serde_json::from_str(r#"{"title":"T","content":"C","author_id":1}"#).unwrap();
        assert!(post.published);
    }

    #[test]
    fn list_query_defaults() {
        let q: ListPostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 10);
        assert!(q.published);
        assert!(q.search.is_none());
    }

    #[test]
    fn public_post_nests_author_without_hash() {
        let row = PostWithAuthor {
            id: 1,
            title: "T".into(),
            content: "C".into(),
            published: true,
            author_id: 2,
            author_username: "alice".into(),
            author_email: "a@x.com".into(),
        };
        let json = serde_json::to_string(&PublicPost::from(row)).unwrap();
        assert!(json.contains("\"author\":{"));
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("password"));
    }
}
