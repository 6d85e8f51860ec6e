//! SeaORM entities backing the Postgres store

pub mod category;
pub mod product;
