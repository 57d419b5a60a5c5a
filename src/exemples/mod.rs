// src/exemples/mod.rs

pub mod exemple_structs;
pub mod exemple_service;
pub mod exemple_router;
