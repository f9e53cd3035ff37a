//! Render inputs and change detection between passes.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use typhoon_common::{Coastline, Cyclone, GeoPoint, Viewport};

/// Everything the host supplies for one render pass.
///
/// Cyclone and coastline data are shared; a refresh replaces the whole
/// `Arc` rather than patching it.
#[derive(Debug, Clone)]
pub struct RenderInputs {
    pub cyclones: Arc<Vec<Cyclone>>,
    pub coastline: Option<Arc<Coastline>>,
    pub viewer_location: Option<GeoPoint>,
    pub viewport: Viewport,
    pub show_satellite: bool,
    /// `None` for live display
    pub query_time: Option<DateTime<Utc>>,
}

impl RenderInputs {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            cyclones: Arc::new(Vec::new()),
            coastline: None,
            viewer_location: None,
            viewport,
            show_satellite: false,
            query_time: None,
        }
    }

    /// Inputs that differ between `previous` and `self`.
    pub fn changed_since(&self, previous: &RenderInputs) -> InputSet {
        let mut set = InputSet::empty();

        if !(Arc::ptr_eq(&self.cyclones, &previous.cyclones) || self.cyclones == previous.cyclones)
        {
            set.insert(Input::Cyclones);
        }
        let same_coastline = match (&self.coastline, &previous.coastline) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if !same_coastline {
            set.insert(Input::Coastline);
        }
        if self.viewer_location != previous.viewer_location {
            set.insert(Input::ViewerLocation);
        }
        if self.viewport.width != previous.viewport.width
            || self.viewport.height != previous.viewport.height
            || self.viewport.density != previous.viewport.density
        {
            set.insert(Input::Bounds);
        }
        if self.viewport.density != previous.viewport.density {
            set.insert(Input::Density);
        }
        if self.show_satellite != previous.show_satellite {
            set.insert(Input::ShowSatellite);
        }
        if self.query_time != previous.query_time {
            set.insert(Input::QueryTime);
        }

        set
    }
}

/// A single render input a layer can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Cyclones,
    Coastline,
    ViewerLocation,
    /// The derived geographic window or its pixel size
    Bounds,
    Density,
    ShowSatellite,
    QueryTime,
}

impl Input {
    pub const ALL: [Input; 7] = [
        Input::Cyclones,
        Input::Coastline,
        Input::ViewerLocation,
        Input::Bounds,
        Input::Density,
        Input::ShowSatellite,
        Input::QueryTime,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A small set of [`Input`]s.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSet(u8);

impl InputSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Input::ALL.iter().copied().collect()
    }

    pub fn insert(&mut self, input: Input) {
        self.0 |= input.bit();
    }

    pub fn contains(&self, input: Input) -> bool {
        self.0 & input.bit() != 0
    }

    pub fn intersects(&self, other: InputSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: InputSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Input> for InputSet {
    fn from_iter<I: IntoIterator<Item = Input>>(iter: I) -> Self {
        let mut set = InputSet::empty();
        for input in iter {
            set.insert(input);
        }
        set
    }
}

impl<const N: usize> From<[Input; N]> for InputSet {
    fn from(inputs: [Input; N]) -> Self {
        inputs.into_iter().collect()
    }
}

impl fmt::Debug for InputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(Input::ALL.iter().filter(|i| self.contains(**i)))
            .finish()
    }
}
