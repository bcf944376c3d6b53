use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use serde::{Deserialize, Serialize};

/// Windows at least this wide show the library as a grid when following the device.
pub const GRID_MIN_WINDOW_WIDTH: f32 = 720.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridMode {
    List,
    #[default]
    Grid,
    FollowDevice,
}

/// Decides between grid and list when the user has not picked one.
///
/// Called synchronously from inside preference updates, so implementations must be cheap.
pub trait GridDefault: Send + Sync {
    fn use_grid_as_default(&self) -> bool;
}

impl<F> GridDefault for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn use_grid_as_default(&self) -> bool {
        self()
    }
}

impl GridMode {
    pub fn resolve(self, default: &dyn GridDefault) -> bool {
        match self {
            GridMode::List => false,
            GridMode::Grid => true,
            GridMode::FollowDevice => default.use_grid_as_default(),
        }
    }

    /// The mode that shows the opposite of what `self` currently shows.
    pub fn toggled(self, default: &dyn GridDefault) -> GridMode {
        match self {
            GridMode::List => GridMode::Grid,
            GridMode::Grid => GridMode::List,
            GridMode::FollowDevice => {
                if default.use_grid_as_default() {
                    GridMode::List
                } else {
                    GridMode::Grid
                }
            }
        }
    }
}

/// Grid default driven by the width of the most recently laid out window.
#[derive(Debug, Clone)]
pub struct WindowGridDefault {
    width_bits: Arc<AtomicU32>,
}

impl WindowGridDefault {
    pub fn new(initial_width: f32) -> Self {
        Self {
            width_bits: Arc::new(AtomicU32::new(initial_width.to_bits())),
        }
    }

    pub fn set_width(&self, width: f32) {
        self.width_bits.store(width.to_bits(), Ordering::Relaxed);
    }

    pub fn width(&self) -> f32 {
        f32::from_bits(self.width_bits.load(Ordering::Relaxed))
    }
}

impl GridDefault for WindowGridDefault {
    fn use_grid_as_default(&self) -> bool {
        self.width() >= GRID_MIN_WINDOW_WIDTH
    }
}
