#![no_std]

pub mod board_io;
pub mod systick;
