pub mod building;
pub mod stop_marking;
pub mod tree;
