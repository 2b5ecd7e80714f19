pub mod launcher;

pub use launcher::BinaryLauncher;
