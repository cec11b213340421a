pub mod config;
pub mod error;
pub mod log;
pub mod replay;
pub mod snapshot;
pub mod timeline;

#[cfg(test)]
mod test;
