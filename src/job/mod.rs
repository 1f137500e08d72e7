//! # JSON Jobs
//!
//! Describe a print job as JSON and replay it on a session.
//!
//! Each entry of `operations` names a session operation in its `op` field;
//! the remaining fields are that operation's parameters. A buffered session
//! is flushed once every operation has been applied.
//!
//! ## Example
//!
//! ```
//! use escpos_net::job::Job;
//! use escpos_net::printer::{Printer, PrinterEndpoint, PrinterMode};
//! use escpos_net::transport::MemoryTransport;
//!
//! let json = r#"{
//!     "operations": [
//!         {"op": "align", "align": "center"},
//!         {"op": "size", "horizontal": 1, "vertical": 1},
//!         {"op": "text", "content": "HELLO"},
//!         {"op": "code2d", "data": "https://example.com", "size": "large"},
//!         {"op": "feed", "lines": 4},
//!         {"op": "cut"}
//!     ]
//! }"#;
//!
//! let job = Job::from_json(json).unwrap();
//! let endpoint = PrinterEndpoint::new("127.0.0.1", 9100, PrinterMode::Buffered);
//! let mut printer = Printer::new(endpoint, MemoryTransport::new());
//! job.run(&mut printer).unwrap();
//! assert_eq!(printer.transport().jobs().len(), 1);
//! ```

mod replay;
mod schema;

pub use schema::{
    Job, JobAlign, JobBarcode, JobCode2d, JobCut, JobFeed, JobFont, JobImage, JobRaw, JobRepeat,
    JobSize, JobText, JobToggle, JobUnderline, Operation,
};
