use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DictationError {
    #[error("speech capture is not supported on this host")]
    Unsupported,
}

/// An optional speech-to-text input.
pub trait SpeechSource: Send {
    fn is_supported(&self) -> bool;
    fn start(&mut self) -> Result<(), DictationError>;
    /// Safe to call when already stopped.
    fn stop(&mut self);
    /// Final transcripts produced since the last call.
    fn take_final(&mut self) -> Vec<String>;
}

/// Source used when the host has no capture device.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeech;

impl SpeechSource for UnsupportedSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self) -> Result<(), DictationError> {
        Err(DictationError::Unsupported)
    }

    fn stop(&mut self) {}

    fn take_final(&mut self) -> Vec<String> {
        Vec::new()
    }
}

/// Listener state plus the text buffer dictated results are appended to.
pub struct Dictation<S: SpeechSource> {
    source: S,
    listening: bool,
    buffer: String,
}

impl<S: SpeechSource> Dictation<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            listening: false,
            buffer: String::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_supported()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn toggle(&mut self) -> Result<bool, DictationError> {
        if self.listening {
            self.stop();
        } else {
            self.start()?;
        }
        Ok(self.listening)
    }

    pub fn start(&mut self) -> Result<(), DictationError> {
        if self.listening {
            return Ok(());
        }
        self.source.start()?;
        self.listening = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.listening {
            self.source.stop();
            self.listening = false;
        }
    }

    /// Appends pending final transcripts, each followed by a space.
    pub fn poll(&mut self) {
        for transcript in self.source.take_final() {
            if transcript.is_empty() {
                continue;
            }
            self.buffer.push_str(&transcript);
            self.buffer.push(' ');
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn take_text(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ScriptedSpeech {
        pending: Vec<String>,
        starts: usize,
        stops: usize,
    }

    impl SpeechSource for ScriptedSpeech {
        fn is_supported(&self) -> bool {
            true
        }

        fn start(&mut self) -> Result<(), DictationError> {
            self.starts += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.stops += 1;
        }

        fn take_final(&mut self) -> Vec<String> {
            std::mem::take(&mut self.pending)
        }
    }

    #[test]
    fn unsupported_source_refuses_to_start() {
        let mut dictation = Dictation::new(UnsupportedSpeech);
        assert!(!dictation.is_supported());
        assert_eq!(dictation.start(), Err(DictationError::Unsupported));
        assert!(!dictation.is_listening());
    }

    #[test]
    fn final_transcripts_are_appended_with_spaces() {
        let mut dictation = Dictation::new(ScriptedSpeech::default());
        dictation.set_text("meeting ");
        dictation.source.pending = vec!["tomorrow".to_string(), "at three".to_string()];
        dictation.poll();
        assert_eq!(dictation.text(), "meeting tomorrow at three ");
        assert_eq!(dictation.take_text(), "meeting tomorrow at three ");
        assert_eq!(dictation.text(), "");
    }

    #[test]
    fn stop_is_idempotent() {
        let mut dictation = Dictation::new(ScriptedSpeech::default());
        assert_eq!(dictation.toggle(), Ok(true));
        dictation.stop();
        dictation.stop();
        assert!(!dictation.is_listening());
        assert_eq!(dictation.source.starts, 1);
        assert_eq!(dictation.source.stops, 1);
    }
}
