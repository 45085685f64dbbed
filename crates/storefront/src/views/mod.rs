//! Screen-level state.
//!
//! A view owns the state containers for one screen and turns their results
//! into notifications. Nothing here renders; callers read the state and draw
//! it however their surface requires.

mod product_list;

pub use product_list::{
    ADDED_TO_CART, ALREADY_IN_CART, EMPTY_CART, ProductListView, REMOVED_FROM_CART,
};
