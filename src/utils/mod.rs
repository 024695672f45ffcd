pub mod input;
pub mod logging;
pub mod scroll;
pub mod trace;
pub mod url;
