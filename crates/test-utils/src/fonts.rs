//! Locating a TrueType font for label tests.
//!
//! No font ships with the workspace, so label tests borrow one from the
//! system and skip when none is installed.

use std::path::PathBuf;

/// Well-known TrueType locations across Linux distributions and macOS.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Searches for a label font.
///
/// `TEST_FONT` wins when set and the file exists; otherwise the first
/// entry of [`SYSTEM_FONTS`] present on disk is used.
pub fn find_test_font() -> Option<PathBuf> {
    let from_env = std::env::var("TEST_FONT").ok().map(PathBuf::from);

    from_env
        .into_iter()
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
        .find(|path| path.is_file())
}
