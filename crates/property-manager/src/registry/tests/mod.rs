mod common;

mod assignment;
mod views;
