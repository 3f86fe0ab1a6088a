pub mod config;
pub mod dom;
pub mod i18n;
pub mod site;
pub mod storage;
pub mod widgets;
