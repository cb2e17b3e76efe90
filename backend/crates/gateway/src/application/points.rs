//! Purchase History / Points Use Case
//!
//! Read-only proxy over the Nasus service, keyed by DNI. Bodies pass
//! through verbatim; the UI renders them directly.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::upstream::PointsBackend;
use crate::domain::value_object::Dni;
use crate::error::GatewayResult;

/// Purchase history / points use case
pub struct PointsUseCase<B>
where
    B: PointsBackend,
{
    backend: Arc<B>,
}

impl<B> PointsUseCase<B>
where
    B: PointsBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn purchases(&self, dni: Option<String>) -> GatewayResult<Value> {
        let dni = Dni::new(dni.unwrap_or_default())?;
        self.backend.purchases(&dni).await
    }

    pub async fn points(&self, dni: Option<String>) -> GatewayResult<Value> {
        let dni = Dni::new(dni.unwrap_or_default())?;
        self.backend.points(&dni).await
    }
}
