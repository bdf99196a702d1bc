pub mod capture;
pub mod controller;
pub mod dispatch;
pub mod recording;
