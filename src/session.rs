use crate::scoring;

/// Countdown length used when the caller does not configure one.
pub const DEFAULT_SECONDS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub number_of_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            number_of_secs: DEFAULT_SECONDS,
        }
    }
}

/// Final counters of a finished (or in-progress) session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub wpm: u32,
    pub accuracy: u32,
    pub phrases: u32,
    pub errors: u32,
}

/// One timed play-through over an ordered phrase sequence.
///
/// Owns all mutable session state; callers drive it with `type_char`,
/// `backspace`, and a once-per-second `tick`.
#[derive(Debug)]
pub struct Session {
    phrases: Vec<String>,
    config: SessionConfig,
    phase: Phase,
    current_phrase_index: usize,
    input: String,
    correct_chars: u32,
    total_chars: u32,
    completed_phrases: u32,
    errors: u32,
    seconds_remaining: u32,
}

impl Session {
    pub fn new(phrases: Vec<String>, config: SessionConfig) -> Self {
        let seconds_remaining = config.number_of_secs;
        // An empty sequence has nothing to type; such a session is over
        // before it starts.
        let phase = if phrases.is_empty() {
            Phase::Ended
        } else {
            Phase::Idle
        };
        Self {
            phrases,
            config,
            phase,
            current_phrase_index: 0,
            input: String::new(),
            correct_chars: 0,
            total_chars: 0,
            completed_phrases: 0,
            errors: 0,
            seconds_remaining,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_phrase(&self) -> Option<&str> {
        self.phrases.get(self.current_phrase_index).map(|p| p.as_str())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn correct_chars(&self) -> u32 {
        self.correct_chars
    }

    pub fn total_chars(&self) -> u32 {
        self.total_chars
    }

    pub fn completed_phrases(&self) -> u32 {
        self.completed_phrases
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Wall time consumed so far, in whole countdown ticks.
    pub fn elapsed_secs(&self) -> f64 {
        (self.config.number_of_secs - self.seconds_remaining) as f64
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Handle one typed character. The first keystroke starts the countdown.
    pub fn type_char(&mut self, c: char) {
        match self.phase {
            Phase::Ended => return,
            Phase::Idle => self.phase = Phase::Running,
            Phase::Running => {}
        }

        self.total_chars += 1;

        let position = self.input.chars().count();
        let expected = self
            .current_phrase()
            .and_then(|phrase| phrase.chars().nth(position));
        match expected {
            Some(e) if e == c => self.correct_chars += 1,
            // Wrong char, or typed past the end of the phrase
            _ => self.errors += 1,
        }

        self.input.push(c);

        if Some(self.input.as_str()) == self.current_phrase() {
            self.completed_phrases += 1;
            self.input.clear();
            self.current_phrase_index += 1;
            if self.current_phrase_index >= self.phrases.len() {
                self.phase = Phase::Ended;
            }
        }
    }

    /// Remove the last buffered character. Counts as a keystroke but never
    /// as an error.
    pub fn backspace(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        if self.input.pop().is_some() {
            self.total_chars += 1;
        }
    }

    /// Advance the countdown by one second. At zero the session ends and
    /// input is locked.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.phase = Phase::Ended;
        }
    }

    /// Derive WPM and accuracy from the current counters.
    pub fn summary(&self) -> Summary {
        Summary {
            wpm: scoring::wpm(self.correct_chars, self.elapsed_secs()),
            accuracy: scoring::accuracy(self.correct_chars, self.total_chars),
            phrases: self.completed_phrases,
            errors: self.errors,
        }
    }
}
