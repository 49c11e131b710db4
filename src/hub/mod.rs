pub mod impl_stdin;
pub mod interface;
