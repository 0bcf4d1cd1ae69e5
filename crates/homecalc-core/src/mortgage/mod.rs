pub mod cmhc;
pub mod down_payment;
pub mod land_transfer_tax;
pub mod quote;
