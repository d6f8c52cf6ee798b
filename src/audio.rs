//! Hit-sound gateway
//!
//! Audio synthesis is a host concern; the simulation only needs a place
//! to send the hit cue. Implementations must never fail out of these
//! operations, so a host without audio degrades to silence.

/// Feedback sound surface the driver fires into.
pub trait HitSoundPlayer {
    /// Play the hit cue, if audio is available and unmuted.
    fn play_hit(&mut self);
    /// Mute or unmute all cues.
    fn set_muted(&mut self, muted: bool);
    /// Current mute state.
    fn is_muted(&self) -> bool;
    /// Release any audio resources; further cues are silent.
    fn dispose(&mut self) {}
}

/// No-op player that still tracks the mute flag, for headless hosts.
#[derive(Debug, Default)]
pub struct SilentSounds {
    muted: bool,
}

impl HitSoundPlayer for SilentSounds {
    fn play_hit(&mut self) {}

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
