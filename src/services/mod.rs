//! Backend access
//!
//! - `gateway`: the request/response surface and the `Gateway` trait
//! - `http`: the HTTP implementation of that trait
//! - `runner`: background execution and completion polling

pub mod gateway;
pub mod http;
pub mod runner;

pub use gateway::{Gateway, GatewayError, Request, Response};
pub use http::HttpGateway;
pub use runner::{Completion, RequestRunner, Ticket};
