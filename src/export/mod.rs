/// Export affordances for a generated QR image
///
/// This module handles:
/// - Saving the PNG into the user's downloads folder
/// - Handing the PNG to the platform share target

pub mod download;
pub mod share;
