use std::fmt::Display;

use diesel::{
    r2d2::{ConnectionManager, Pool, PoolError, PooledConnection},
    result::{DatabaseErrorKind, Error as DieselError},
    PgConnection,
};

use super::models::{
    blog::{Blog, NewBlog},
    comment::{Comment, NewComment},
    like::Like,
    user::User,
};

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/** Errors surfaced by a [BlogStore] */
#[derive(Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    Conflict,
    /// The write referenced a blog or user that no longer exists
    MissingReference,
    /// No connection could be checked out, or the blocking pool is gone
    Unavailable(String),
    Query(DieselError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Conflict => f.write_str("unique constraint violated"),
            StoreError::MissingReference => f.write_str("foreign key constraint violated"),
            StoreError::Unavailable(reason) => write!(f, "database unavailable: {}", reason),
            StoreError::Query(err) => write!(f, "query failed: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => StoreError::Conflict,
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                StoreError::MissingReference
            }
            other => StoreError::Query(other),
        }
    }
}

impl From<PoolError> for StoreError {
    fn from(err: PoolError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Persistence operations the request handlers depend on.
///
/// Every method is blocking; handlers call them through
/// [`AppState::run`](crate::app::AppState::run).
pub trait BlogStore: Send + Sync + 'static {
    fn list_blogs(&self) -> Result<Vec<Blog>, StoreError>;
    fn list_blogs_by_author(&self, author_id: i32) -> Result<Vec<Blog>, StoreError>;
    fn create_blog(&self, new_blog: NewBlog) -> Result<Blog, StoreError>;
    fn find_blog(&self, blog_id: i32) -> Result<Option<Blog>, StoreError>;
    /// `None` when the blog is missing or not written by `author_id`.
    fn update_blog(
        &self,
        blog_id: i32,
        author_id: i32,
        title: String,
        content: String,
    ) -> Result<Option<Blog>, StoreError>;
    /// Removes the blog with its comments and likes. `None` when the blog is
    /// missing or not written by `author_id`.
    fn delete_blog(&self, blog_id: i32, author_id: i32) -> Result<Option<Blog>, StoreError>;

    fn comments_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>, StoreError>;
    /// Fails with [StoreError::MissingReference] when the blog or user is gone.
    fn create_comment(&self, new_comment: NewComment) -> Result<Comment, StoreError>;

    fn count_likes(&self, blog_id: i32) -> Result<i64, StoreError>;
    /// Fails with [StoreError::Conflict] when the pair already liked the blog,
    /// and with [StoreError::MissingReference] when the blog or user is gone.
    fn create_like(&self, blog_id: i32, user_id: i32) -> Result<Like, StoreError>;
    /// Returns whether a like was removed.
    fn delete_like(&self, blog_id: i32, user_id: i32) -> Result<bool, StoreError>;

    fn user_exists(&self, user_id: i32) -> Result<bool, StoreError>;
}

/** [BlogStore] backed by a pool of postgres connections */
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> PgStore {
        PgStore { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, StoreError> {
        Ok(self.pool.get()?)
    }
}

impl BlogStore for PgStore {
    fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let conn = self.conn()?;
        Ok(Blog::get_all(&conn)?)
    }

    fn list_blogs_by_author(&self, author_id: i32) -> Result<Vec<Blog>, StoreError> {
        let conn = self.conn()?;
        Ok(Blog::get_by_author_id(&conn, author_id)?)
    }

    fn create_blog(&self, new_blog: NewBlog) -> Result<Blog, StoreError> {
        let conn = self.conn()?;
        Ok(Blog::create(&conn, &new_blog)?)
    }

    fn find_blog(&self, blog_id: i32) -> Result<Option<Blog>, StoreError> {
        let conn = self.conn()?;
        Ok(Blog::get_by_id(&conn, blog_id)?)
    }

    fn update_blog(
        &self,
        blog_id: i32,
        author_id: i32,
        title: String,
        content: String,
    ) -> Result<Option<Blog>, StoreError> {
        let conn = self.conn()?;
        Ok(Blog::edit(&conn, blog_id, author_id, &title, &content)?)
    }

    fn delete_blog(&self, blog_id: i32, author_id: i32) -> Result<Option<Blog>, StoreError> {
        let conn = self.conn()?;
        Ok(Blog::delete_owned(&conn, blog_id, author_id)?)
    }

    fn comments_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>, StoreError> {
        let conn = self.conn()?;
        Ok(Comment::find_by_blog(&conn, blog_id)?)
    }

    fn create_comment(&self, new_comment: NewComment) -> Result<Comment, StoreError> {
        let conn = self.conn()?;
        Ok(Comment::create(&conn, &new_comment)?)
    }

    fn count_likes(&self, blog_id: i32) -> Result<i64, StoreError> {
        let conn = self.conn()?;
        Ok(Like::count_by_blog_id(&conn, blog_id)?)
    }

    fn create_like(&self, blog_id: i32, user_id: i32) -> Result<Like, StoreError> {
        let conn = self.conn()?;
        Ok(Like::create(&conn, blog_id, user_id)?)
    }

    fn delete_like(&self, blog_id: i32, user_id: i32) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        Ok(Like::delete(&conn, blog_id, user_id)? > 0)
    }

    fn user_exists(&self, user_id: i32) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        Ok(User::exists(&conn, user_id)?)
    }
}
