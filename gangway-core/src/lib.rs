pub mod error;
pub mod models;

pub use error::{GangwayError, Result};
pub use models::{
    LaunchReport, LaunchSpec, DEFAULT_BINARY, DEFAULT_PORT, PORT_VAR, RUN_MODE_VALUE, RUN_MODE_VAR,
};
