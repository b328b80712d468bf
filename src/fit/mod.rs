/// Cover and contain transform chains.
pub mod transform;
