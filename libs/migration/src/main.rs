//! Migration CLI for the catalog schema.
//!
//! Reads `DATABASE_URL`, e.g. `cargo run -p migration -- up` or `-- fresh`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
