/// Background jobs
pub mod integrity_sweep;

pub use integrity_sweep::start_integrity_sweep;
