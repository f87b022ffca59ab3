pub mod crypto;
pub mod flash;
pub mod session;
