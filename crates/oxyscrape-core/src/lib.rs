pub mod config;
pub mod credentials;
pub mod error;
pub mod job;
pub mod job_driver;
pub mod parsing;
pub mod payload;
pub mod realtime;
pub mod response;
pub mod source;
pub mod transport;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use config::{Config, Mode};
pub use credentials::Credentials;
pub use error::ScrapeError;
pub use job_driver::{JobDriver, JobEvent, JobReporter, TracingJobReporter};
pub use payload::{ContextEntry, Extras, Payload};
pub use realtime::RealtimeDriver;
pub use response::Response;
pub use source::Source;
pub use transport::{HttpMethod, HttpReply, HttpRequest, RequestKind, Transport};
