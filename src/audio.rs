//! Fire-and-forget sound effects.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Shoot,
    Hit,
}

impl Sound {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shoot => "shoot",
            Self::Hit => "hit",
        }
    }
}

/// Anything that can play a short named effect.  Nothing is returned to
/// the caller; a sink that cannot play simply drops the request.
pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

/// Sink used when no audio device is wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct MuteAudio;

impl AudioSink for MuteAudio {
    fn play(&mut self, sound: Sound) {
        log::trace!("muted sound: {}", sound.as_str());
    }
}
