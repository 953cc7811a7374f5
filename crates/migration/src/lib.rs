pub use sea_orm_migration::prelude::*;

mod m20240301_create_lookup_tables;
mod m20240302_create_feedback_tables;
mod m20240310_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_create_lookup_tables::Migration),
            Box::new(m20240302_create_feedback_tables::Migration),
            Box::new(m20240310_add_indexes::Migration),
        ]
    }
}
