use sea_orm_migration::prelude::*;

mod m20250601_000001_create_reportes_table;
mod m20250601_000002_add_imagen_column;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_reportes_table::Migration),
            Box::new(m20250601_000002_add_imagen_column::Migration),
        ]
    }
}
