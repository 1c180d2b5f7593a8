#[macro_use]
extern crate diesel;
extern crate dotenv;

pub mod app;
pub mod database;
pub mod schema;

mod routes;

use actix_web::{App, HttpServer};
use app::AppState;
use routes::{api::*, category::*, comment::*, review::*, user::*};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let app_state = AppState::new(None);
    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| String::from("127.0.0.1:8080"));

    log::info!("Server running on {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(app_state.clone()))
            .service(get_api)
            //Category routes
            .service(get_categories)
            //Review routes
            .service(get_reviews)
            .service(get_review_by_id)
            .service(patch_review_votes)
            //Comment routes
            .service(get_comments_by_review)
            .service(post_comment)
            .service(delete_comment)
            //User routes
            .service(get_users)
    })
    .bind(bind_addr)?
    .run()
    .await
}
