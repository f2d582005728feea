pub mod auth_request;
pub mod details_request;

pub use auth_request::{SigninRequest, SignupRequest, TokensRequest};
pub use details_request::DetailsRequest;
