use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Core(#[from] cmdparse_core::error::Error),

    #[error("Error parsing output template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering output template: {}", .0)]
    Render(#[from] RenderError),
}
