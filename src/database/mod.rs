pub mod db_utils;
pub mod exists;
pub mod models;
pub mod query;
