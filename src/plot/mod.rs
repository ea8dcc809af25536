pub mod export;
pub mod figure;
pub mod request;
pub mod ticks;
