table! {
    categories (slug) {
        slug -> Varchar,
        description -> Varchar,
    }
}

table! {
    users (username) {
        username -> Varchar,
        name -> Varchar,
        avatar_url -> Varchar,
    }
}

table! {
    reviews (review_id) {
        review_id -> Int4,
        title -> Varchar,
        review_body -> Varchar,
        designer -> Varchar,
        review_img_url -> Varchar,
        votes -> Int4,
        category -> Varchar,
        owner -> Varchar,
        created_at -> Timestamp,
    }
}

table! {
    comments (comment_id) {
        comment_id -> Int4,
        body -> Varchar,
        votes -> Int4,
        author -> Varchar,
        review_id -> Int4,
        created_at -> Timestamp,
    }
}

allow_tables_to_appear_in_same_query!(
    categories,
    users,
    reviews,
    comments,
);
