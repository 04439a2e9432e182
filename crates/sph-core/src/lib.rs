pub mod boundary;
pub mod config;
pub mod density;
pub mod forces;
pub mod grid;
pub mod kernels;
pub mod particle;
pub mod solver;
