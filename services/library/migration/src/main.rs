use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(athenaeum_library_migration::Migrator).await;
}
