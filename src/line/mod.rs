//! Splitting dialogue lines into speaker and spoken content.

mod speaker;

pub(crate) use speaker::{split_speaker_line, SpeakerLine};
