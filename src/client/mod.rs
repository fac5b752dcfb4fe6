mod calls;
mod company;
mod http;
mod staff;

pub use http::ApiClient;
