pub mod calculator;

#[cfg(feature = "presentation")]
pub mod display;

pub mod down_payment;

#[cfg(feature = "presentation")]
pub mod form;
