// Behaviour of the classic syntax, one module per area.

mod blocks;
mod spans;
