pub mod mortgage;
