//! In-process [BlogStore] used by the handler tests. Mirrors the postgres
//! schema: ids are sequential, comments and likes must reference an existing
//! blog and user, deleting a blog drops its comments and likes, and
//! (blog, user) is unique among likes.

use std::sync::Mutex;

use chrono::Utc;

use super::models::{
    blog::{Blog, NewBlog},
    comment::{Comment, NewComment},
    like::Like,
};
use super::store::{BlogStore, StoreError};

#[derive(Default)]
struct Tables {
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    users: Vec<i32>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn references_exist(&self, blog_id: i32, user_id: i32) -> bool {
        self.blogs.iter().any(|blog| blog.id == blog_id) && self.users.contains(&user_id)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn with_users(user_ids: &[i32]) -> MemoryStore {
        let store = MemoryStore::default();
        store.tables.lock().unwrap().users.extend_from_slice(user_ids);
        store
    }

    pub fn blog_count(&self) -> usize {
        self.tables.lock().unwrap().blogs.len()
    }

    pub fn like_count(&self) -> usize {
        self.tables.lock().unwrap().likes.len()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable(String::from("memory store poisoned")))
    }
}

impl BlogStore for MemoryStore {
    fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        Ok(self.lock()?.blogs.clone())
    }

    fn list_blogs_by_author(&self, author_id: i32) -> Result<Vec<Blog>, StoreError> {
        let mut blogs: Vec<Blog> = self
            .lock()?
            .blogs
            .iter()
            .filter(|blog| blog.author_id == author_id)
            .cloned()
            .collect();
        blogs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(blogs)
    }

    fn create_blog(&self, new_blog: NewBlog) -> Result<Blog, StoreError> {
        let mut tables = self.lock()?;
        let blog = Blog {
            id: tables.next_id(),
            title: new_blog.title,
            content: new_blog.content,
            author_id: new_blog.author_id,
            created_at: new_blog.created_at,
            updated_at: new_blog.updated_at,
        };
        tables.blogs.push(blog.clone());

        Ok(blog)
    }

    fn find_blog(&self, blog_id: i32) -> Result<Option<Blog>, StoreError> {
        Ok(self.lock()?.blogs.iter().find(|blog| blog.id == blog_id).cloned())
    }

    fn update_blog(
        &self,
        blog_id: i32,
        author_id: i32,
        title: String,
        content: String,
    ) -> Result<Option<Blog>, StoreError> {
        let mut tables = self.lock()?;
        let blog = tables
            .blogs
            .iter_mut()
            .find(|blog| blog.id == blog_id && blog.author_id == author_id);

        Ok(blog.map(|blog| {
            blog.title = title;
            blog.content = content;
            blog.updated_at = Utc::now();
            blog.clone()
        }))
    }

    fn delete_blog(&self, blog_id: i32, author_id: i32) -> Result<Option<Blog>, StoreError> {
        let mut tables = self.lock()?;
        let position = tables
            .blogs
            .iter()
            .position(|blog| blog.id == blog_id && blog.author_id == author_id);

        Ok(position.map(|index| {
            tables.likes.retain(|like| like.blog_id != blog_id);
            tables.comments.retain(|comment| comment.blog_id != blog_id);
            tables.blogs.remove(index)
        }))
    }

    fn comments_for_blog(&self, blog_id: i32) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .lock()?
            .comments
            .iter()
            .filter(|comment| comment.blog_id == blog_id)
            .cloned()
            .collect())
    }

    fn create_comment(&self, new_comment: NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.lock()?;
        if !tables.references_exist(new_comment.blog_id, new_comment.user_id) {
            return Err(StoreError::MissingReference);
        }
        let comment = Comment {
            id: tables.next_id(),
            content: new_comment.content,
            blog_id: new_comment.blog_id,
            user_id: new_comment.user_id,
            created_at: new_comment.created_at,
        };
        tables.comments.push(comment.clone());

        Ok(comment)
    }

    fn count_likes(&self, blog_id: i32) -> Result<i64, StoreError> {
        let tables = self.lock()?;
        Ok(tables.likes.iter().filter(|like| like.blog_id == blog_id).count() as i64)
    }

    fn create_like(&self, blog_id: i32, user_id: i32) -> Result<Like, StoreError> {
        let mut tables = self.lock()?;
        if !tables.references_exist(blog_id, user_id) {
            return Err(StoreError::MissingReference);
        }
        if tables
            .likes
            .iter()
            .any(|like| like.blog_id == blog_id && like.user_id == user_id)
        {
            return Err(StoreError::Conflict);
        }

        let like = Like {
            id: tables.next_id(),
            blog_id,
            user_id,
            created_at: Utc::now(),
        };
        tables.likes.push(like.clone());

        Ok(like)
    }

    fn delete_like(&self, blog_id: i32, user_id: i32) -> Result<bool, StoreError> {
        let mut tables = self.lock()?;
        let before = tables.likes.len();
        tables
            .likes
            .retain(|like| !(like.blog_id == blog_id && like.user_id == user_id));

        Ok(tables.likes.len() != before)
    }

    fn user_exists(&self, user_id: i32) -> Result<bool, StoreError> {
        Ok(self.lock()?.users.contains(&user_id))
    }
}

/// A store whose database is never reachable.
pub struct UnavailableStore;

impl UnavailableStore {
    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Unavailable(String::from("connection refused")))
    }
}

impl BlogStore for UnavailableStore {
    fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        self.fail()
    }

    fn list_blogs_by_author(&self, _: i32) -> Result<Vec<Blog>, StoreError> {
        self.fail()
    }

    fn create_blog(&self, _: NewBlog) -> Result<Blog, StoreError> {
        self.fail()
    }

    fn find_blog(&self, _: i32) -> Result<Option<Blog>, StoreError> {
        self.fail()
    }

    fn update_blog(&self, _: i32, _: i32, _: String, _: String) -> Result<Option<Blog>, StoreError> {
        self.fail()
    }

    fn delete_blog(&self, _: i32, _: i32) -> Result<Option<Blog>, StoreError> {
        self.fail()
    }

    fn comments_for_blog(&self, _: i32) -> Result<Vec<Comment>, StoreError> {
        self.fail()
    }

    fn create_comment(&self, _: NewComment) -> Result<Comment, StoreError> {
        self.fail()
    }

    fn count_likes(&self, _: i32) -> Result<i64, StoreError> {
        self.fail()
    }

    fn create_like(&self, _: i32, _: i32) -> Result<Like, StoreError> {
        self.fail()
    }

    fn delete_like(&self, _: i32, _: i32) -> Result<bool, StoreError> {
        self.fail()
    }

    fn user_exists(&self, _: i32) -> Result<bool, StoreError> {
        self.fail()
    }
}
