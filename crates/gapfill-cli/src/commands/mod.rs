pub mod check;
pub mod encode;
pub mod init;
pub mod lang;
pub mod play;
pub mod sections;
pub mod validate;
