pub mod dispatch;
pub mod generate;
pub mod history;
pub mod preview;
