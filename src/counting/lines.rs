use crate::config::LinePlacement;
use crate::error::ConfigError;

/// Horizontal tripwires, fixed for a session and tested in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLines {
    ys: Vec<i32>,
}

impl ReferenceLines {
    pub fn new(ys: Vec<i32>) -> Result<Self, ConfigError> {
        if ys.is_empty() {
            return Err(ConfigError::NoReferenceLines);
        }
        Ok(Self { ys })
    }

    /// Resolve a placement against the frame height.
    ///
    /// Fractions are truncated to whole pixel rows.
    pub fn from_placement(placement: &LinePlacement, frame_height: u32) -> Result<Self, ConfigError> {
        match placement {
            LinePlacement::Fractions(fractions) => {
                let mut ys = Vec::with_capacity(fractions.len());
                for &f in fractions {
                    if !(0.0..=1.0).contains(&f) {
                        return Err(ConfigError::LineFractionOutOfRange(f));
                    }
                    ys.push((frame_height as f64 * f) as i32);
                }
                Self::new(ys)
            }
            LinePlacement::Absolute(ys) => Self::new(ys.clone()),
        }
    }

    pub fn ys(&self) -> &[i32] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }
}
