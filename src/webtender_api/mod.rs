pub mod client;
pub mod model;
pub mod transport;

pub use client::{WebtenderClient, join_url};
pub use model::ApiResponse;
pub use transport::ReqwestTransport;
