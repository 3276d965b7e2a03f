pub mod storage;
pub mod webdriver;
