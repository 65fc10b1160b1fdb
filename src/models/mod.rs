pub mod reporte;

pub use reporte::{Entity as Reporte, Model as ReporteModel};
