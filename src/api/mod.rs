//! HTTP API module for the PAYE engine.
//!
//! Endpoints:
//! - `GET /api/health`
//! - `GET /api/rules`
//! - `POST /api/calculate-paye`
//! - `POST /api/classify`
//! - `POST /api/assessment`
//! - `GET /api/checklist`

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssessmentRequest, CalculationRequest, ChecklistQuery, ClassifyRequest, from_body,
};
pub use response::{ApiEnvelope, ApiError, ApiErrorResponse};
pub use state::AppState;
