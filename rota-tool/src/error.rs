use thiserror::Error;

#[derive(Debug, Error)]
pub enum RotaToolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Duty is incomplete: {}", .0.join(", "))]
    IncompleteDuty(Vec<&'static str>),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("API error: {0}")]
    Api(#[from] rota_api::RotaError),
}
