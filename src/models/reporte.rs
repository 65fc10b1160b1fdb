use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "reportes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub tipo: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub nombre: String,
    #[sea_orm(column_type = "Text")]
    pub descripcion: String,
    pub lat: f64,
    pub lng: f64,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub entidad: String,
    /// Stored as naive UTC; converted to Bogota wall time only for display.
    pub fecha_creacion: DateTime,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub imagen: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
