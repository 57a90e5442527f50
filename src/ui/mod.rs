/// User interface composition
///
/// This module handles:
/// - The single-page layout (input, size slider, actions, result panel)
/// - Transient toast notices overlaid on the page

pub mod page;
pub mod toast;
