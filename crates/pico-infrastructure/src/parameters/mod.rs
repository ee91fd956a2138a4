//! Parameters
//!
//! | Parameter | Supplies the slot from |
//! |-----------|------------------------|
//! | [`ComponentParameter`] | an adapter found by type or key, here or in a parent |
//! | [`ConstantParameter`] | a fixed value |
//! | [`DefaultValueParameter`] | the default declared on the slot |
//!
//! Slots without an explicit parameter use [`ComponentParameter::DEFAULT`].

mod component;
mod constant;
mod default_value;

pub use component::ComponentParameter;
pub use constant::ConstantParameter;
pub use default_value::DefaultValueParameter;
