pub mod build;
pub mod check;
pub mod matching;
pub mod routes;
