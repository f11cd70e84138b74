//! HTTP plumbing shared by all operations: transport seam, header building and interceptors.

pub mod headers;
pub mod interceptor;
pub mod transport;

pub use headers::HttpHeaderBuilder;
pub use interceptor::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
pub use transport::{
    HttpTransport, HttpTransportRequest, HttpTransportResponse, MultipartBody, MultipartFile,
    ReqwestTransport, TransportBody,
};
