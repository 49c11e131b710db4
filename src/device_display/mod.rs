pub mod charset;
pub mod impl_console;
pub mod impl_fake;
pub mod impl_tinkerforge;
pub mod interface;
