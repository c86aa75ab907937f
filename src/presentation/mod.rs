//! HTML views rendered with askama templates.

pub mod views;
