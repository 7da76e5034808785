//! # ct-server
//!
//! Process bootstrap (paths, tracing, wiring) and the local HTTP API.
//! 进程启动与本地 HTTP 接口。

pub mod bootstrap;
pub mod http;
