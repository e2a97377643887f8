//! Host APIs backing the fetcher.
//!
//! - [`http`] - `reqwest` transport

pub mod http;

pub use http::ReqwestTransport;
