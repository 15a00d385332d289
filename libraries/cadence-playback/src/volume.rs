//! Volume and mute state
//!
//! Volume is the engine's linear 0.0 - 1.0 scale. The level is taken as
//! given; callers are trusted UI code and keep it in range.

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0 - 1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create a volume controller
    pub fn new(level: f32, muted: bool) -> Self {
        Self { level, muted }
    }

    /// Set volume level
    ///
    /// Raising the level above zero while muted unmutes. Returns `true` when
    /// that happened so the caller can forward it to the engine.
    pub fn set_level(&mut self, level: f32) -> bool {
        self.level = level;

        if self.muted && level > 0.0 {
            self.muted = false;
            return true;
        }

        false
    }

    /// Current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_VOLUME, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::default();
        assert_eq!(vol.level(), 0.8);
        assert!(!vol.is_muted());
    }

    #[test]
    fn set_level_does_not_clamp() {
        let mut vol = Volume::new(0.5, false);
        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.5);
    }

    #[test]
    fn raising_volume_unmutes() {
        let mut vol = Volume::new(0.5, true);

        assert!(vol.set_level(0.3));
        assert!(!vol.is_muted());
        assert_eq!(vol.level(), 0.3);
    }

    #[test]
    fn zero_volume_keeps_mute() {
        let mut vol = Volume::new(0.5, true);

        assert!(!vol.set_level(0.0));
        assert!(vol.is_muted());
    }

    #[test]
    fn set_level_unmuted_reports_nothing() {
        let mut vol = Volume::new(0.5, false);
        assert!(!vol.set_level(0.9));
        assert!(!vol.is_muted());
    }

    #[test]
    fn toggle_mute_preserves_level() {
        let mut vol = Volume::new(0.6, false);

        assert!(vol.toggle_mute());
        assert_eq!(vol.level(), 0.6);

        assert!(!vol.toggle_mute());
        assert_eq!(vol.level(), 0.6);
    }
}
