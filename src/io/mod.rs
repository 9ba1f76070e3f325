pub mod config_io;
pub mod gateway;
pub mod lock;
pub mod paths;
pub mod picker;
pub mod storage;
pub mod widget;
