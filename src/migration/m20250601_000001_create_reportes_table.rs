use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Reportes {
    Table,
    Id,
    Tipo,
    Nombre,
    Descripcion,
    Lat,
    Lng,
    Entidad,
    FechaCreacion,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reportes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reportes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reportes::Tipo).string_len(50).not_null())
                    .col(ColumnDef::new(Reportes::Nombre).string_len(100).not_null())
                    .col(ColumnDef::new(Reportes::Descripcion).text().not_null())
                    .col(ColumnDef::new(Reportes::Lat).double().not_null())
                    .col(ColumnDef::new(Reportes::Lng).double().not_null())
                    .col(
                        ColumnDef::new(Reportes::Entidad)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reportes::FechaCreacion)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reportes_fecha_creacion")
                    .table(Reportes::Table)
                    .col(Reportes::FechaCreacion)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reportes::Table).to_owned())
            .await
    }
}
