use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::travel::VehicleRef;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub image: Option<String>,
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub price: f64, // NUMERIC(10,2), selected as float8
    pub year: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Vehicle {
    pub fn to_ref(&self) -> VehicleRef {
        VehicleRef {
            id: self.id,
            title: self.title.clone(),
            plate_number: self.plate_number.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
        }
    }
}
