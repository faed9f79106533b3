use thiserror::Error;

pub mod memory;
pub mod player;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn internal<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Internal(msg.into()))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
