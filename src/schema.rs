table! {
    blogs (id) {
        id -> Int4,
        title -> Varchar,
        content -> Text,
        author_id -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    comments (id) {
        id -> Int4,
        content -> Text,
        blog_id -> Int4,
        user_id -> Int4,
        created_at -> Timestamptz,
    }
}

table! {
    likes (id) {
        id -> Int4,
        blog_id -> Int4,
        user_id -> Int4,
        created_at -> Timestamptz,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

joinable!(blogs -> users (author_id));
joinable!(comments -> blogs (blog_id));
joinable!(comments -> users (user_id));
joinable!(likes -> blogs (blog_id));
joinable!(likes -> users (user_id));

allow_tables_to_appear_in_same_query!(
    blogs,
    comments,
    likes,
    users,
);
