use crate::{
    error::{AppError, AppResult},
    models::{reporte, Reporte, ReporteModel},
    utils::SharedClock,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
    TransactionTrait,
};

/// Required fields of a new report. Presence is checked by the handler
/// before this layer, not by the store.
#[derive(Debug, Clone)]
pub struct NuevoReporte {
    pub tipo: String,
    pub nombre: String,
    pub descripcion: String,
    pub lat: f64,
    pub lng: f64,
    pub entidad: String,
    pub imagen: Option<String>,
}

pub struct ReporteService {
    db: DatabaseConnection,
    clock: SharedClock,
}

impl ReporteService {
    pub fn new(db: DatabaseConnection, clock: SharedClock) -> Self {
        Self { db, clock }
    }

    /// Insert a new report. `id` and `fecha_creacion` are server-assigned;
    /// the timestamp comes from the injected clock at insert time.
    pub async fn crear(&self, nuevo: NuevoReporte) -> AppResult<ReporteModel> {
        // A transaction dropped without commit rolls back.
        let txn = self.db.begin().await?;

        let model = reporte::ActiveModel {
            tipo: Set(nuevo.tipo),
            nombre: Set(nuevo.nombre),
            descripcion: Set(nuevo.descripcion),
            lat: Set(nuevo.lat),
            lng: Set(nuevo.lng),
            entidad: Set(nuevo.entidad),
            fecha_creacion: Set(self.clock.now_utc().naive_utc()),
            imagen: Set(nuevo.imagen),
            ..Default::default()
        };

        let saved = model.insert(&txn).await?;
        txn.commit().await?;
        Ok(saved)
    }

    /// All reports, newest first. Ties on `fecha_creacion` fall back to
    /// descending `id` so insertion order still reads newest first.
    pub async fn listar(&self) -> AppResult<Vec<ReporteModel>> {
        let reportes = Reporte::find()
            .order_by_desc(reporte::Column::FechaCreacion)
            .order_by_desc(reporte::Column::Id)
            .all(&self.db)
            .await?;
        Ok(reportes)
    }

    /// Delete a report by id.
    pub async fn eliminar(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        let existing = Reporte::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        existing.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}
