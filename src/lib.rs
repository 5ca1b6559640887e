pub mod args;
pub mod consts;
pub mod error;
pub mod invoke;
pub mod params;
pub mod repeater;
pub mod response;
