//! PizzaFun Page Model
//!
//! Defines the data contracts shared by the animation core and the
//! presentation tree:
//! - **Content:** every piece of copy and chart data on the page
//! - **Geometry:** points, element bounds, and the viewport
//! - **Events:** timestamped pointer/scroll/resize input (JSONL)
//!
//! Coordinates are CSS pixels in viewport space with the origin at the
//! top-left corner.

pub mod content;
pub mod event;
pub mod geometry;

pub use content::*;
pub use event::*;
pub use geometry::*;
