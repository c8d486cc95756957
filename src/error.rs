use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - underflow")]
    Underflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("Curve error - cannot buy all remaining supply")]
    CannotBuyAllRemainingSupply,
    #[error("Curve error - cannot sell beyond max token supply")]
    CannotExceedMaxSupply,
    #[error("Curve error - buy amount too large")]
    BuyAmountTooLarge,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SamplerError {
    #[error("Sampler error - max points must be at least 2")]
    InvalidMaxPoints,
    #[error("Sampler error - max threshold must be at least 100 percent")]
    InvalidMaxThreshold,
    #[error("Sampler error - decimal overflow while pricing a point")]
    DecimalOverflow,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    CurveError(#[from] crate::error::CurveError),

    #[error(transparent)]
    SamplerError(#[from] crate::error::SamplerError),
}
