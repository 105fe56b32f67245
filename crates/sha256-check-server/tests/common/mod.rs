#![allow(dead_code)]

pub mod fixture;
pub mod http_client;
