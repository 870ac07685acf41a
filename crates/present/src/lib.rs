//! # Casebook Present
//!
//! Presentation helpers shared by the HTML dashboard and the terminal renderer.
//!
//! Nothing here touches the navigator's state. Every function takes a rendered block list and
//! returns display data: fractions, column splits, chart geometry, SVG or text.

pub mod layout;
pub mod radar;
pub mod text;

pub use layout::{priority_fraction, split_by_parity, CardColumns};
pub use radar::{axis_heading, RadarChart, RadarPoint};
pub use text::render_view;
