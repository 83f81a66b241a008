pub mod console;
pub mod correlate;
pub mod plot;

pub use correlate::correlate;
