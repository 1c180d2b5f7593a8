use crate::app::AppError;

/// Columns the review listing may be sorted by. `comment_count` is the
/// aggregate alias, not a stored column.
const SORTABLE_COLUMNS: [&str; 9] = [
    "owner",
    "title",
    "review_id",
    "category",
    "review_img_url",
    "created_at",
    "votes",
    "designer",
    "comment_count",
];

/// Sort directions, case-sensitive.
const ORDERS: [&str; 2] = ["asc", "desc"];

const LISTING_BASE: &str = "\
SELECT reviews.review_id, reviews.title, reviews.review_body, reviews.designer, \
reviews.review_img_url, reviews.votes, reviews.category, reviews.owner, \
reviews.created_at, COUNT(comments.comment_id) AS comment_count \
FROM reviews LEFT JOIN comments ON comments.review_id = reviews.review_id";

/// Builds the SQL text for the filtered/sorted review listing.
///
/// `sort_by` and `order` are checked against the allow-lists, in that order,
/// before any SQL is assembled; a value outside either list rejects with
/// [`AppError::InvalidQuery`]. When `with_category` is set the statement
/// carries a `$1` placeholder for the slug value, which the caller binds —
/// the value itself is never interpolated into the text. `review_id` is
/// always appended as a secondary sort key so ties order deterministically.
pub fn build_review_listing(
    with_category: bool,
    sort_by: Option<&str>,
    order: Option<&str>,
) -> Result<String, AppError> {
    let sort_by = sort_by.unwrap_or("created_at");
    let order = order.unwrap_or("desc");

    if !SORTABLE_COLUMNS.contains(&sort_by) {
        return Err(AppError::InvalidQuery);
    }
    if !ORDERS.contains(&order) {
        return Err(AppError::InvalidQuery);
    }

    let mut sql = String::from(LISTING_BASE);
    if with_category {
        sql.push_str(" WHERE reviews.category = $1");
    }
    sql.push_str(" GROUP BY reviews.review_id");
    sql.push_str(&format!(
        " ORDER BY {} {}, reviews.review_id DESC",
        sort_by,
        order.to_uppercase()
    ));

    Ok(sql)
}

/// The single-review read, joined with its comment count the same way the
/// listing is.
pub fn build_review_by_id() -> String {
    let mut sql = String::from(LISTING_BASE);
    sql.push_str(" WHERE reviews.review_id = $1 GROUP BY reviews.review_id");
    sql
}
