//! HTTP layer for the FinanzApp backend
//!
//! `transport` sends raw requests, `client` adds the base URL, bearer
//! tokens and the refresh-on-401 policy, and `download` handles file
//! downloads.

pub mod client;
pub mod download;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use client::{error_message, ApiClient, ApiResponse, Origin, REFRESH_PATH};
pub use download::{filename_from_content_disposition, Download};
pub use transport::{
    mime_for_path, FormPart, HttpRequest, HttpResponse, Method, RequestBody, ReqwestTransport,
    Transport, UploadFile,
};
