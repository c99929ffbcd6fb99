pub mod impl_crossterm;
pub mod impl_fake;
pub mod interface;
