mod error;
pub use error::Error;

mod http;
pub use http::HttpApi;

mod identity;
pub use identity::Identity;

mod notice;
pub use notice::{Notice, NoticeKind};

mod remote;
pub use remote::{execute, CommentsApi, Request, Response};

mod thread;
pub use thread::{Thread, ThreadState, EMPTY_THREAD_MESSAGE};

mod time;
pub use time::time_ago;

pub mod api {
    pub use teatok_api::*;
}
