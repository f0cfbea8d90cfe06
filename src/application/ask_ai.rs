//! Narrative and recommendation requests with user-facing fallbacks

use crate::infrastructure::StoryTeller;

/// Text to show the user after asking the AI service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Produced by the service
    Generated(String),
    /// The service failed; a message explaining that instead
    Fallback(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Generated(text) | Reply::Fallback(text) => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reply::Fallback(_))
    }
}

/// Wraps a `StoryTeller` so that no service failure reaches the caller
pub struct StoryService<T: StoryTeller> {
    teller: T,
}

impl<T: StoryTeller> StoryService<T> {
    pub fn new(teller: T) -> Self {
        StoryService { teller }
    }

    pub fn teller(&self) -> &T {
        &self.teller
    }

    /// Narrative for a trip
    pub fn story(&self, location: &str, notes: &str) -> Reply {
        match self.teller.generate_story(location, notes) {
            Ok(text) => Reply::Generated(text),
            Err(e) => {
                tracing::warn!(error = %e, %location, "story generation failed");
                Reply::Fallback(format!(
                    "Oopsie! No pude escribir el relato de {} ahora mismo. ({})",
                    location, e
                ))
            }
        }
    }

    /// Recommendations for a destination; blank destinations are not sent
    pub fn recommend(&self, destination: &str) -> Reply {
        let destination = destination.trim();
        if destination.is_empty() {
            return Reply::Fallback("Escribe un destino para buscar ideas.".to_string());
        }

        match self.teller.recommendations(destination) {
            Ok(text) => Reply::Generated(text),
            Err(e) => {
                tracing::warn!(error = %e, %destination, "recommendations failed");
                Reply::Fallback(format!(
                    "Oopsie! No pude consultar ideas para {}. ({})",
                    destination, e
                ))
            }
        }
    }
}
