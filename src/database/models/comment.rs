use chrono::{DateTime, Utc};
use diesel::{prelude::*, PgConnection};
use serde::Serialize;

use crate::schema::comments;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub blog_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "comments"]
pub struct NewComment {
    pub content: String,
    pub blog_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(blog_id: i32, user_id: i32, content: String) -> NewComment {
        NewComment {
            content,
            blog_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

impl Comment {
    /** Creates a comment on the blog specified */
    pub fn create(conn: &PgConnection, new_comment: &NewComment) -> QueryResult<Comment> {
        diesel::insert_into(comments::table)
            .values(new_comment)
            .get_result(conn)
    }

    /** Returns all comments posted in a blog, oldest first */
    pub fn find_by_blog(conn: &PgConnection, blog_id_in: i32) -> QueryResult<Vec<Comment>> {
        use crate::schema::comments::dsl::*;

        comments
            .filter(blog_id.eq(blog_id_in))
            .order((created_at.asc(), id.asc()))
            .load::<Comment>(conn)
    }
}

/// A comment as inlined in a blog, without the blog reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSummary {
    pub id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentSummary {
    fn from(comment: Comment) -> Self {
        CommentSummary {
            id: comment.id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}
