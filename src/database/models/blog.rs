use chrono::{DateTime, Utc};
use diesel::{prelude::*, PgConnection};
use serde::Serialize;

use crate::schema::{self, blogs};

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Queryable)]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[table_name = "blogs"]
pub struct NewBlog {
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewBlog {
    pub fn new(author_id: i32, title: String, content: String) -> NewBlog {
        let now = Utc::now();

        NewBlog {
            title,
            content,
            author_id,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Blog {
    pub fn create(conn: &PgConnection, new_blog: &NewBlog) -> QueryResult<Blog> {
        diesel::insert_into(blogs::table)
            .values(new_blog)
            .get_result(conn)
    }

    pub fn get_all(conn: &PgConnection) -> QueryResult<Vec<Blog>> {
        blogs::table.order(blogs::id.asc()).load::<Blog>(conn)
    }

    /** Newest first */
    pub fn get_by_author_id(conn: &PgConnection, author: i32) -> QueryResult<Vec<Blog>> {
        use crate::schema::blogs::dsl::*;

        blogs
            .filter(author_id.eq(author))
            .order((created_at.desc(), id.desc()))
            .load::<Blog>(conn)
    }

    pub fn get_by_id(conn: &PgConnection, blog_id: i32) -> QueryResult<Option<Blog>> {
        blogs::table.find(blog_id).first::<Blog>(conn).optional()
    }

    /// Rewrites title and content of the blog only when `author` owns it.
    /// Returns the row as stored after the update, or `None` when no blog
    /// with that id belongs to `author`.
    pub fn edit(
        conn: &PgConnection,
        blog_id: i32,
        author: i32,
        title_in: &str,
        content_in: &str,
    ) -> QueryResult<Option<Blog>> {
        use crate::schema::blogs::dsl::*;

        diesel::update(blogs.filter(id.eq(blog_id)).filter(author_id.eq(author)))
            .set((
                title.eq(title_in),
                content.eq(content_in),
                updated_at.eq(Utc::now()),
            ))
            .get_result::<Blog>(conn)
            .optional()
    }

    /// Deletes the blog along with its likes and comments when `author` owns it.
    /// Returns the snapshot of the deleted row.
    pub fn delete_owned(conn: &PgConnection, blog_id: i32, author: i32) -> QueryResult<Option<Blog>> {
        conn.transaction(|| {
            let owned = blogs::table
                .filter(blogs::id.eq(blog_id))
                .filter(blogs::author_id.eq(author))
                .first::<Blog>(conn)
                .optional()?;
            if owned.is_none() {
                return Ok(None);
            }

            diesel::delete(schema::likes::table)
                .filter(schema::likes::blog_id.eq(blog_id))
                .execute(conn)?;
            diesel::delete(schema::comments::table)
                .filter(schema::comments::blog_id.eq(blog_id))
                .execute(conn)?;
            diesel::delete(blogs::table.find(blog_id)).execute(conn)?;

            Ok(owned)
        })
    }
}
