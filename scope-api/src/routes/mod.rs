pub(crate) mod error;
pub(crate) mod scope;

pub(crate) use error::ApiError;
