use chrono::{DateTime, Utc};
use diesel::{prelude::*, PgConnection};
use serde::Serialize;

use crate::schema::likes;

#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct Like {
    pub id: i32,
    pub blog_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "likes"]
pub struct NewLike {
    pub blog_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// The (blog, user) pair a like is keyed on, as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRef {
    pub blog_id: i32,
    pub user_id: i32,
}

impl From<&Like> for LikeRef {
    fn from(like: &Like) -> Self {
        LikeRef {
            blog_id: like.blog_id,
            user_id: like.user_id,
        }
    }
}

impl Like {
    /// Inserts the like. A second like for the same pair fails with a
    /// unique violation from the `likes_blog_id_user_id_key` constraint.
    pub fn create(conn: &PgConnection, blog: i32, user: i32) -> QueryResult<Like> {
        let like = NewLike {
            blog_id: blog,
            user_id: user,
            created_at: Utc::now(),
        };

        diesel::insert_into(likes::table)
            .values(&like)
            .get_result(conn)
    }

    pub fn count_by_blog_id(conn: &PgConnection, blog: i32) -> QueryResult<i64> {
        use crate::schema::likes::dsl::*;

        likes.filter(blog_id.eq(blog)).count().get_result(conn)
    }

    /// Returns the number of rows removed, zero or one.
    pub fn delete(conn: &PgConnection, blog: i32, user: i32) -> QueryResult<usize> {
        use crate::schema::likes::dsl::*;

        diesel::delete(likes.filter(blog_id.eq(blog)).filter(user_id.eq(user))).execute(conn)
    }
}
