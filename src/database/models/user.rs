use diesel::{dsl::exists, prelude::*, PgConnection};

use crate::schema::users;

/// Users are owned by the auth layer; this service only checks they exist.
pub struct User;

impl User {
    pub fn exists(conn: &PgConnection, user_id: i32) -> QueryResult<bool> {
        diesel::select(exists(users::table.find(user_id))).get_result(conn)
    }
}
